//! Indian pincode and city lookups used to pre-fill checkout addresses.
//!
//! The tables cover the metro and tier-2 areas the shop delivers to most;
//! an unknown pincode simply leaves city and state for the customer to type.

use std::collections::BTreeSet;

use serde::Serialize;

/// Country code of the domestic market; the lookups only apply there.
pub const DOMESTIC_COUNTRY: &str = "IN";

/// City and state resolved from a pincode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub city: &'static str,
    pub state: &'static str,
}

/// Pincode, city, state. Sorted by pincode for binary search.
const PINCODES: &[(&str, &str, &str)] = &[
    ("110001", "Delhi", "Delhi"),
    ("110002", "Delhi", "Delhi"),
    ("110020", "Delhi", "Delhi"),
    ("110034", "Delhi", "Delhi"),
    ("110044", "Delhi", "Delhi"),
    ("110075", "Delhi", "Delhi"),
    ("110085", "Delhi", "Delhi"),
    ("110092", "Delhi", "Delhi"),
    ("110096", "Delhi", "Delhi"),
    ("141001", "Ludhiana", "Punjab"),
    ("141002", "Ludhiana", "Punjab"),
    ("143001", "Amritsar", "Punjab"),
    ("143002", "Amritsar", "Punjab"),
    ("144001", "Jalandhar", "Punjab"),
    ("144002", "Jalandhar", "Punjab"),
    ("160001", "Chandigarh", "Punjab"),
    ("160002", "Chandigarh", "Punjab"),
    ("160017", "Chandigarh", "Punjab"),
    ("160036", "Chandigarh", "Punjab"),
    ("160047", "Chandigarh", "Punjab"),
    ("201301", "Noida", "Uttar Pradesh"),
    ("201304", "Noida", "Uttar Pradesh"),
    ("201307", "Greater Noida", "Uttar Pradesh"),
    ("201308", "Greater Noida", "Uttar Pradesh"),
    ("201310", "Greater Noida", "Uttar Pradesh"),
    ("208001", "Kanpur", "Uttar Pradesh"),
    ("208002", "Kanpur", "Uttar Pradesh"),
    ("221001", "Varanasi", "Uttar Pradesh"),
    ("221002", "Varanasi", "Uttar Pradesh"),
    ("226001", "Lucknow", "Uttar Pradesh"),
    ("226002", "Lucknow", "Uttar Pradesh"),
    ("226010", "Lucknow", "Uttar Pradesh"),
    ("226016", "Lucknow", "Uttar Pradesh"),
    ("302001", "Jaipur", "Rajasthan"),
    ("302002", "Jaipur", "Rajasthan"),
    ("302015", "Jaipur", "Rajasthan"),
    ("302017", "Jaipur", "Rajasthan"),
    ("302020", "Jaipur", "Rajasthan"),
    ("302033", "Jaipur", "Rajasthan"),
    ("313001", "Udaipur", "Rajasthan"),
    ("313002", "Udaipur", "Rajasthan"),
    ("342001", "Jodhpur", "Rajasthan"),
    ("342002", "Jodhpur", "Rajasthan"),
    ("380001", "Ahmedabad", "Gujarat"),
    ("380002", "Ahmedabad", "Gujarat"),
    ("380015", "Ahmedabad", "Gujarat"),
    ("380054", "Ahmedabad", "Gujarat"),
    ("380061", "Ahmedabad", "Gujarat"),
    ("390001", "Vadodara", "Gujarat"),
    ("390002", "Vadodara", "Gujarat"),
    ("390007", "Vadodara", "Gujarat"),
    ("390023", "Vadodara", "Gujarat"),
    ("395001", "Surat", "Gujarat"),
    ("395002", "Surat", "Gujarat"),
    ("395007", "Surat", "Gujarat"),
    ("395009", "Surat", "Gujarat"),
    ("400001", "Mumbai", "Maharashtra"),
    ("400002", "Mumbai", "Maharashtra"),
    ("400049", "Mumbai", "Maharashtra"),
    ("400051", "Mumbai", "Maharashtra"),
    ("400053", "Mumbai", "Maharashtra"),
    ("400055", "Mumbai", "Maharashtra"),
    ("400058", "Mumbai", "Maharashtra"),
    ("400064", "Mumbai", "Maharashtra"),
    ("400069", "Mumbai", "Maharashtra"),
    ("400076", "Mumbai", "Maharashtra"),
    ("400097", "Mumbai", "Maharashtra"),
    ("400614", "Navi Mumbai", "Maharashtra"),
    ("400705", "Navi Mumbai", "Maharashtra"),
    ("411001", "Pune", "Maharashtra"),
    ("411002", "Pune", "Maharashtra"),
    ("411004", "Pune", "Maharashtra"),
    ("411006", "Pune", "Maharashtra"),
    ("411014", "Pune", "Maharashtra"),
    ("411027", "Pune", "Maharashtra"),
    ("411057", "Pune", "Maharashtra"),
    ("431001", "Aurangabad", "Maharashtra"),
    ("431002", "Aurangabad", "Maharashtra"),
    ("440001", "Nagpur", "Maharashtra"),
    ("440002", "Nagpur", "Maharashtra"),
    ("440010", "Nagpur", "Maharashtra"),
    ("440022", "Nagpur", "Maharashtra"),
    ("452001", "Indore", "Madhya Pradesh"),
    ("452002", "Indore", "Madhya Pradesh"),
    ("452010", "Indore", "Madhya Pradesh"),
    ("452018", "Indore", "Madhya Pradesh"),
    ("462001", "Bhopal", "Madhya Pradesh"),
    ("462002", "Bhopal", "Madhya Pradesh"),
    ("462016", "Bhopal", "Madhya Pradesh"),
    ("462026", "Bhopal", "Madhya Pradesh"),
    ("482001", "Jabalpur", "Madhya Pradesh"),
    ("482002", "Jabalpur", "Madhya Pradesh"),
    ("485001", "Gwalior", "Madhya Pradesh"),
    ("485002", "Gwalior", "Madhya Pradesh"),
    ("500001", "Hyderabad", "Telangana"),
    ("500002", "Hyderabad", "Telangana"),
    ("500018", "Hyderabad", "Telangana"),
    ("500032", "Hyderabad", "Telangana"),
    ("500034", "Hyderabad", "Telangana"),
    ("500045", "Hyderabad", "Telangana"),
    ("500072", "Hyderabad", "Telangana"),
    ("500081", "Hyderabad", "Telangana"),
    ("500084", "Hyderabad", "Telangana"),
    ("560001", "Bangalore", "Karnataka"),
    ("560002", "Bangalore", "Karnataka"),
    ("560011", "Bangalore", "Karnataka"),
    ("560034", "Bangalore", "Karnataka"),
    ("560037", "Bangalore", "Karnataka"),
    ("560043", "Bangalore", "Karnataka"),
    ("560048", "Bangalore", "Karnataka"),
    ("560064", "Bangalore", "Karnataka"),
    ("560066", "Bangalore", "Karnataka"),
    ("560095", "Bangalore", "Karnataka"),
    ("560103", "Bangalore", "Karnataka"),
    ("570001", "Mysore", "Karnataka"),
    ("570002", "Mysore", "Karnataka"),
    ("570020", "Mysore", "Karnataka"),
    ("575001", "Mangalore", "Karnataka"),
    ("575002", "Mangalore", "Karnataka"),
    ("580001", "Hubli", "Karnataka"),
    ("580002", "Hubli", "Karnataka"),
    ("580020", "Hubli", "Karnataka"),
    ("590001", "Belgaum", "Karnataka"),
    ("590002", "Belgaum", "Karnataka"),
    ("600001", "Chennai", "Tamil Nadu"),
    ("600002", "Chennai", "Tamil Nadu"),
    ("600028", "Chennai", "Tamil Nadu"),
    ("600040", "Chennai", "Tamil Nadu"),
    ("600042", "Chennai", "Tamil Nadu"),
    ("600095", "Chennai", "Tamil Nadu"),
    ("600096", "Chennai", "Tamil Nadu"),
    ("600097", "Chennai", "Tamil Nadu"),
    ("600119", "Chennai", "Tamil Nadu"),
    ("673001", "Kozhikode", "Kerala"),
    ("673002", "Kozhikode", "Kerala"),
    ("673004", "Kozhikode", "Kerala"),
    ("673014", "Kozhikode", "Kerala"),
    ("679101", "Palakkad", "Kerala"),
    ("679102", "Palakkad", "Kerala"),
    ("680001", "Thrissur", "Kerala"),
    ("680002", "Thrissur", "Kerala"),
    ("680021", "Thrissur", "Kerala"),
    ("682001", "Kochi", "Kerala"),
    ("682002", "Kochi", "Kerala"),
    ("682020", "Kochi", "Kerala"),
    ("682024", "Kochi", "Kerala"),
    ("682030", "Kochi", "Kerala"),
    ("682037", "Kochi", "Kerala"),
    ("686001", "Kottayam", "Kerala"),
    ("686002", "Kottayam", "Kerala"),
    ("695001", "Thiruvananthapuram", "Kerala"),
    ("695002", "Thiruvananthapuram", "Kerala"),
    ("695011", "Thiruvananthapuram", "Kerala"),
    ("695024", "Thiruvananthapuram", "Kerala"),
    ("700001", "Kolkata", "West Bengal"),
    ("700002", "Kolkata", "West Bengal"),
    ("700019", "Kolkata", "West Bengal"),
    ("700028", "Kolkata", "West Bengal"),
    ("700053", "Kolkata", "West Bengal"),
    ("700061", "Kolkata", "West Bengal"),
    ("700064", "Kolkata", "West Bengal"),
    ("700091", "Kolkata", "West Bengal"),
];

/// City, state.
const CITIES: &[(&str, &str)] = &[
    ("Mumbai", "Maharashtra"),
    ("Navi Mumbai", "Maharashtra"),
    ("Delhi", "Delhi"),
    ("Bangalore", "Karnataka"),
    ("Hyderabad", "Telangana"),
    ("Chennai", "Tamil Nadu"),
    ("Kolkata", "West Bengal"),
    ("Pune", "Maharashtra"),
    ("Ahmedabad", "Gujarat"),
    ("Surat", "Gujarat"),
    ("Vadodara", "Gujarat"),
    ("Lucknow", "Uttar Pradesh"),
    ("Kanpur", "Uttar Pradesh"),
    ("Varanasi", "Uttar Pradesh"),
    ("Noida", "Uttar Pradesh"),
    ("Greater Noida", "Uttar Pradesh"),
    ("Jaipur", "Rajasthan"),
    ("Udaipur", "Rajasthan"),
    ("Jodhpur", "Rajasthan"),
    ("Kochi", "Kerala"),
    ("Thiruvananthapuram", "Kerala"),
    ("Kozhikode", "Kerala"),
    ("Thrissur", "Kerala"),
    ("Kottayam", "Kerala"),
    ("Palakkad", "Kerala"),
    ("Bhopal", "Madhya Pradesh"),
    ("Indore", "Madhya Pradesh"),
    ("Jabalpur", "Madhya Pradesh"),
    ("Gwalior", "Madhya Pradesh"),
    ("Chandigarh", "Punjab"),
    ("Ludhiana", "Punjab"),
    ("Jalandhar", "Punjab"),
    ("Amritsar", "Punjab"),
    ("Coimbatore", "Tamil Nadu"),
    ("Mysore", "Karnataka"),
    ("Hubli", "Karnataka"),
    ("Belgaum", "Karnataka"),
    ("Mangalore", "Karnataka"),
    ("Nagpur", "Maharashtra"),
    ("Aurangabad", "Maharashtra"),
    ("Visakhapatnam", "Andhra Pradesh"),
];

/// Look up the city and state for a 6-digit pincode.
#[must_use]
pub fn location_from_pincode(pincode: &str) -> Option<Location> {
    PINCODES
        .binary_search_by(|(pin, _, _)| (*pin).cmp(pincode))
        .ok()
        .and_then(|index| PINCODES.get(index))
        .map(|&(_, city, state)| Location { city, state })
}

/// State for an exact (case-sensitive) city name.
#[must_use]
pub fn state_from_city(city: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|&(_, state)| state)
}

/// Cities whose name contains `input`, case-insensitively, sorted by name.
#[must_use]
pub fn city_suggestions(input: &str) -> Vec<&'static str> {
    let needle = input.to_lowercase();
    let mut matches: Vec<&'static str> = CITIES
        .iter()
        .map(|&(city, _)| city)
        .filter(|city| city.to_lowercase().contains(&needle))
        .collect();
    matches.sort_unstable();
    matches
}

/// Every state that appears in the city table, sorted and de-duplicated.
#[must_use]
pub fn states() -> Vec<&'static str> {
    CITIES
        .iter()
        .map(|&(_, state)| state)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `country` is the domestic market.
#[must_use]
pub fn is_domestic(country: &str) -> bool {
    country.trim().eq_ignore_ascii_case(DOMESTIC_COUNTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pincode_table_is_sorted() {
        assert!(PINCODES.windows(2).all(|w| match w {
            [a, b] => a.0 < b.0,
            _ => true,
        }));
    }

    #[test]
    fn test_location_from_pincode() {
        assert_eq!(
            location_from_pincode("560034"),
            Some(Location {
                city: "Bangalore",
                state: "Karnataka"
            })
        );
        assert_eq!(location_from_pincode("999999"), None);
        assert_eq!(location_from_pincode("5600"), None);
    }

    #[test]
    fn test_state_from_city() {
        assert_eq!(state_from_city("Pune"), Some("Maharashtra"));
        assert_eq!(state_from_city("pune"), None);
    }

    #[test]
    fn test_city_suggestions_case_insensitive_sorted() {
        let suggestions = city_suggestions("mum");
        assert_eq!(suggestions, ["Mumbai", "Navi Mumbai"]);
        assert!(city_suggestions("zzz").is_empty());
    }

    #[test]
    fn test_states_unique_sorted() {
        let all = states();
        assert!(all.windows(2).all(|w| match w {
            [a, b] => a < b,
            _ => true,
        }));
        assert!(all.contains(&"Kerala"));
    }

    #[test]
    fn test_is_domestic() {
        assert!(is_domestic("IN"));
        assert!(is_domestic(" in "));
        assert!(!is_domestic("US"));
    }
}

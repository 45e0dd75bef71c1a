use serde::Serialize;

/// A destination the planner knows how to center a map on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

static CITIES: [City; 18] = [
    City { name: "Mumbai", lat: 19.0760, lon: 72.8777 },
    City { name: "Delhi", lat: 28.6139, lon: 77.2090 },
    City { name: "Bengaluru", lat: 12.9716, lon: 77.5946 },
    City { name: "Chennai", lat: 13.0827, lon: 80.2707 },
    City { name: "Kolkata", lat: 22.5726, lon: 88.3639 },
    City { name: "Hyderabad", lat: 17.3850, lon: 78.4867 },
    City { name: "Pune", lat: 18.5204, lon: 73.8567 },
    City { name: "Ahmedabad", lat: 23.0225, lon: 72.5714 },
    City { name: "Jaipur", lat: 26.9124, lon: 75.7873 },
    City { name: "Goa", lat: 15.2993, lon: 74.1240 },
    City { name: "Kochi", lat: 9.9312, lon: 76.2673 },
    City { name: "Varanasi", lat: 25.3176, lon: 82.9739 },
    City { name: "Agra", lat: 27.1767, lon: 78.0081 },
    City { name: "Rishikesh", lat: 30.0869, lon: 78.2676 },
    City { name: "Shimla", lat: 31.1048, lon: 77.1734 },
    City { name: "Darjeeling", lat: 27.0360, lon: 88.2627 },
    City { name: "Udaipur", lat: 24.5854, lon: 73.6826 },
    City { name: "Amritsar", lat: 31.6340, lon: 74.8723 },
];

pub fn all() -> &'static [City] {
    &CITIES
}

/// Exact, case-sensitive lookup.
pub fn lookup(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.name == name)
}

/// Case-insensitive prefix search used by the city picker.
pub fn search(prefix: &str) -> Vec<&'static City> {
    let prefix = prefix.trim().to_lowercase();
    CITIES
        .iter()
        .filter(|city| city.name.to_lowercase().starts_with(&prefix))
        .collect()
}

use crate::error::FmiError;
use std::fmt;

/// Where to query weather data for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A place name, e.g. a Finnish city such as "Helsinki".
    Place(String),
    /// An FMI observation station id, e.g. "101799" (Oulu, Pellonpää).
    Fmisid(String),
}

impl Location {
    /// Builds a location from the two optional selectors. Exactly one must be
    /// given; empty strings count as missing.
    pub fn from_parts(place: Option<&str>, fmisid: Option<&str>) -> Result<Self, FmiError> {
        let place = place.filter(|p| !p.trim().is_empty());
        let fmisid = fmisid.filter(|f| !f.trim().is_empty());
        match (place, fmisid) {
            (Some(place), None) => Ok(Location::Place(place.to_string())),
            (None, Some(fmisid)) => Ok(Location::Fmisid(fmisid.to_string())),
            (None, None) => Err(FmiError::MissingLocation),
            (Some(_), Some(_)) => Err(FmiError::AmbiguousLocation),
        }
    }

    /// The stored query parameter selecting this location.
    pub(crate) fn query_pair(&self) -> (String, String) {
        match self {
            Location::Place(place) => ("place".to_string(), place.clone()),
            Location::Fmisid(fmisid) => ("fmisid".to_string(), fmisid.clone()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Place(place) => write!(f, "place {place}"),
            Location::Fmisid(fmisid) => write!(f, "fmisid {fmisid}"),
        }
    }
}

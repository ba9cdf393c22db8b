use super::variable::Variable;
use serde::Serialize;

/// Separator used in spline well variable names:
/// `<param>#<well_name>#heel|toe#x|y|z`.
pub const NAME_DELIMITER: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Heel,
    Toe,
}

/// The well-related parts of a variable name, if it follows the convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WellCoordinate<'a> {
    well: &'a str,
    endpoint: Option<Endpoint>,
    axis: Option<usize>,
}

impl<'a> WellCoordinate<'a> {
    fn parse(name: &'a str) -> Option<Self> {
        let parts: Vec<&str> = name.split(NAME_DELIMITER).collect();
        if parts.len() < 4 {
            return None;
        }
        let endpoint = match parts[2] {
            "heel" => Some(Endpoint::Heel),
            "toe" => Some(Endpoint::Toe),
            _ => None,
        };
        let axis = match parts[3] {
            "x" => Some(0),
            "y" => Some(1),
            "z" => Some(2),
            _ => None,
        };
        Some(Self {
            well: parts[1],
            endpoint,
            axis,
        })
    }
}

/// Distinct well names in first-seen order.
pub fn extract_well_names(variables: &[Variable]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for coord in variables
        .iter()
        .filter_map(|v| WellCoordinate::parse(v.name()))
    {
        if !names.iter().any(|n| n == coord.well) {
            names.push(coord.well.to_string());
        }
    }
    names
}

/// Heel and toe `[x, y, z]` for `well_name`. Axes never set stay 0.0.
pub fn extract_well_endpoints(variables: &[Variable], well_name: &str) -> ([f64; 3], [f64; 3]) {
    let mut heel = [0.0; 3];
    let mut toe = [0.0; 3];
    for var in variables {
        let Some(coord) = WellCoordinate::parse(var.name()) else {
            continue;
        };
        if coord.well != well_name {
            continue;
        }
        let (Some(endpoint), Some(axis)) = (coord.endpoint, coord.axis) else {
            continue;
        };
        match endpoint {
            Endpoint::Heel => heel[axis] = var.value(),
            Endpoint::Toe => toe[axis] = var.value(),
        }
    }
    (heel, toe)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Well {
    pub name: String,
    pub heel: [f64; 3],
    pub toe: [f64; 3],
}

impl Well {
    pub fn from_variables(variables: &[Variable], name: &str) -> Self {
        let (heel, toe) = extract_well_endpoints(variables, name);
        Self {
            name: name.to_string(),
            heel,
            toe,
        }
    }

    /// Straight-line heel to toe distance.
    pub fn length(&self) -> f64 {
        self.heel
            .iter()
            .zip(self.toe.iter())
            .map(|(h, t)| (t - h).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

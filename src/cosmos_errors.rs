use thiserror::Error;

#[derive(Error, Debug)]
pub enum CosmosError {
    #[error("Invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("Invalid propagation time: {0}")]
    InvalidTime(f64),

    #[error(
        "Kepler equation did not converge after {iterations} iterations (E = {eccentric_anomaly}, residual = {residual:e})"
    )]
    Convergence {
        eccentric_anomaly: f64,
        residual: f64,
        iterations: usize,
    },

    #[error("Invalid solver settings: {0}")]
    InvalidSolverSettings(String),

    #[error("Invalid time grid: {0}")]
    InvalidTimeGrid(String),

    #[error("Invalid celestial body: {0}")]
    InvalidBody(String),

    #[error("Invalid physical property: {0}")]
    InvalidPhysicalProperty(String),

    #[error("Duplicate body name in star system: {0}")]
    DuplicateBody(String),

    #[error("Body '{body}' references unknown parent '{parent}'")]
    UnknownParent { body: String, parent: String },

    #[error("Parent chain forms a cycle through body '{0}'")]
    HierarchyCycle(String),

    #[error("Body not found: {0}")]
    BodyNotFound(String),

    #[error("Unable to parse catalogue: {0}")]
    CatalogueParse(String),

    #[error("Unsupported catalogue version: {0}")]
    UnsupportedCatalogueVersion(u32),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Propagation of '{body}' failed at t = {t}: {source}")]
    PropagationFailed {
        body: String,
        t: f64,
        #[source]
        source: Box<CosmosError>,
    },
}

impl From<toml::de::Error> for CosmosError {
    fn from(err: toml::de::Error) -> Self {
        CosmosError::CatalogueParse(err.to_string())
    }
}

impl CosmosError {
    /// Attach the failing body and time to an error raised by the propagator.
    pub fn at_body(self, body: &str, t: f64) -> Self {
        CosmosError::PropagationFailed {
            body: body.to_string(),
            t,
            source: Box::new(self),
        }
    }
}

impl PartialEq for CosmosError {
    fn eq(&self, other: &Self) -> bool {
        use CosmosError::*;
        match (self, other) {
            (InvalidElements(a), InvalidElements(b)) => a == b,
            (InvalidTime(a), InvalidTime(b)) => a.to_bits() == b.to_bits(),
            (
                Convergence {
                    eccentric_anomaly: e1,
                    residual: r1,
                    iterations: i1,
                },
                Convergence {
                    eccentric_anomaly: e2,
                    residual: r2,
                    iterations: i2,
                },
            ) => e1.to_bits() == e2.to_bits() && r1.to_bits() == r2.to_bits() && i1 == i2,
            (InvalidSolverSettings(a), InvalidSolverSettings(b)) => a == b,
            (InvalidTimeGrid(a), InvalidTimeGrid(b)) => a == b,
            (InvalidBody(a), InvalidBody(b)) => a == b,
            (InvalidPhysicalProperty(a), InvalidPhysicalProperty(b)) => a == b,
            (DuplicateBody(a), DuplicateBody(b)) => a == b,
            (
                UnknownParent {
                    body: b1,
                    parent: p1,
                },
                UnknownParent {
                    body: b2,
                    parent: p2,
                },
            ) => b1 == b2 && p1 == p2,
            (HierarchyCycle(a), HierarchyCycle(b)) => a == b,
            (BodyNotFound(a), BodyNotFound(b)) => a == b,
            (CatalogueParse(a), CatalogueParse(b)) => a == b,
            (UnsupportedCatalogueVersion(a), UnsupportedCatalogueVersion(b)) => a == b,

            // Not comparable: equal when the variant matches
            (Io(_), Io(_)) => true,
            (Csv(_), Csv(_)) => true,

            (
                PropagationFailed {
                    body: b1,
                    t: t1,
                    source: s1,
                },
                PropagationFailed {
                    body: b2,
                    t: t2,
                    source: s2,
                },
            ) => b1 == b2 && t1.to_bits() == t2.to_bits() && s1 == s2,

            _ => false,
        }
    }
}

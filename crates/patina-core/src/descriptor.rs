use serde::Deserialize;

/// Top-level configuration document: an ordered list of filter stages.
///
/// Wire shape:
/// ```json
/// { "filters": [ { "key": "exposure", "parameters": [ { "key": "val", "val": 0.5 } ] } ] }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct FilterChain {
    pub filters: Vec<FilterDescriptor>,
}

/// One pipeline stage: a filter identifier plus its named parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct FilterDescriptor {
    pub key: String,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ParameterEntry {
    pub key: String,
    pub val: ParamValue,
}

/// A parameter value is either a scalar or a short numeric list; which
/// shapes are acceptable is filter-specific and checked at bind time.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f32),
    List(Vec<f32>),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::List(_) => None,
        }
    }

    pub fn as_vec2(&self) -> Option<[f32; 2]> {
        match self {
            Self::List(v) if v.len() == 2 => Some([v[0], v[1]]),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            Self::List(v) if v.len() == 3 => Some([v[0], v[1], v[2]]),
            _ => None,
        }
    }

    pub fn as_vec5(&self) -> Option<[f32; 5]> {
        match self {
            Self::List(v) if v.len() == 5 => Some([v[0], v[1], v[2], v[3], v[4]]),
            _ => None,
        }
    }

    /// Human-readable shape description for error messages.
    pub fn kind(&self) -> String {
        match self {
            Self::Scalar(_) => "a scalar".to_string(),
            Self::List(v) => format!("a {}-element list", v.len()),
        }
    }
}

impl FilterDescriptor {
    /// Convenience constructor, mostly for tests and programmatic chains.
    pub fn new(key: impl Into<String>, parameters: Vec<(String, ParamValue)>) -> Self {
        Self {
            key: key.into(),
            parameters: parameters
                .into_iter()
                .map(|(key, val)| ParameterEntry { key, val })
                .collect(),
        }
    }
}

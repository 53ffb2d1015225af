use std::fmt;
use std::str::FromStr;

/// One hop from an element to one of its child elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathStep {
    /// Zero-based position among the child elements, ignoring text and comments.
    Index(usize),
    /// First child element with this local name.
    Name(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Address of an element below the document root, written as `/`-separated
/// steps, e.g. `8/0/1` or `distributionManagement/repository/url`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodePath(Vec<PathStep>);

impl NodePath {
    pub fn new(steps: Vec<PathStep>) -> Result<Self, NodePathError> {
        if steps.is_empty() {
            return Err(NodePathError::Empty);
        }
        Ok(Self(steps))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NodePathError {
    #[error("Node path is empty")]
    Empty,

    #[error("Node path {0:?} contains an empty step")]
    EmptyStep(String),
}

impl FromStr for NodePath {
    type Err = NodePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(NodePathError::Empty);
        }
        let steps = trimmed
            .split('/')
            .map(|step| match step.trim() {
                "" => Err(NodePathError::EmptyStep(s.to_owned())),
                step => Ok(match step.parse::<usize>() {
                    Ok(index) => PathStep::Index(index),
                    Err(_) => PathStep::Name(step.to_owned()),
                }),
            })
            .collect::<Result<_, _>>()?;
        Self::new(steps)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

//! Benchmark parameter types.

use std::fmt;

/// Size of a square benchmark instance.
#[derive(Clone, Copy, Debug)]
pub struct SizeParams {
    /// Vertices, tasks, or sources and destinations for transport.
    pub size: usize,
}

impl fmt::Display for SizeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_size() {
        assert_eq!(SizeParams { size: 40 }.to_string(), "n=40");
    }
}

use regex::Regex;

use crate::Result;

/// Which master the codes of a [`Dimension`] are checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Branch,
    Commodity,
}

impl Axis {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Commodity => "commodity",
        }
    }
}

/// One axis of aggregation: where its codes are defined, what they look
/// like, and where its totals go.
///
/// To get the standard settings, use [`Dimension::branch`] or
/// [`Dimension::commodity`]. To change which codes are accepted, use
/// [`Dimension::with_pattern`].
#[derive(Clone, Debug)]
pub struct Dimension {
    axis: Axis,
    master_file: String,
    output_file: String,
    pattern: String,
}

impl Dimension {
    /// Branches: `branch.lst` in, `branch.out` out, codes of exactly three
    /// digits.
    #[must_use]
    pub fn branch() -> Self {
        Self {
            axis: Axis::Branch,
            master_file: "branch.lst".into(),
            output_file: "branch.out".into(),
            pattern: "[0-9]{3}".into(),
        }
    }

    /// Commodities: `commodity.lst` in, `commodity.out` out, codes of exactly
    /// eight ASCII letters or digits.
    #[must_use]
    pub fn commodity() -> Self {
        Self {
            axis: Axis::Commodity,
            master_file: "commodity.lst".into(),
            output_file: "commodity.out".into(),
            pattern: "[A-Za-z0-9]{8}".into(),
        }
    }

    /// Replaces the code pattern.
    ///
    /// `pattern` can be any regular expression supported by [`regex::Regex`].
    /// It must match a code in its entirety, not just part of it. The pattern
    /// is wrapped in a group when compiled, so a trailing `(?x)` comment
    /// makes it invalid.
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.axis.label()
    }

    #[must_use]
    pub fn master_file(&self) -> &str {
        &self.master_file
    }

    #[must_use]
    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    /// Compiles the code pattern, anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns any errors from compiling the pattern with [`Regex::new`].
    pub fn code_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&format!("^(?:{})$", self.pattern))?)
    }
}

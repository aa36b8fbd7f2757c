use std::fmt;

/// Error codes for every user-facing diagnostic.
///
/// The first digit is the phase: E0xxx lexer, E1xxx parser, E2xxx binder.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Integer literal out of range
    E0003,

    // Parser errors (E1xxx)
    /// Unexpected token
    E1001,

    // Binder errors (E2xxx)
    /// Cannot convert between types
    E2001,
    /// Operator not defined for operand types
    E2002,
    /// Undefined variable
    E2003,
    /// Argument count mismatch
    E2004,
    /// Argument type mismatch
    E2005,
    /// Variable already declared in this scope
    E2006,
    /// Assignment to read-only variable
    E2007,
    /// Undefined function
    E2008,
    /// Void expression used as a value
    E2009,
}

impl ErrorCode {
    /// The code as printed, e.g. `E2003`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

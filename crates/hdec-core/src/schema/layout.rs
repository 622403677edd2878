pub const PART_SEPARATOR: char = ':';
pub const TYPE_SEPARATOR: char = ',';

/// First non-space characters that mark a line as a comment.
pub const COMMENT_MARKERS: [char; 5] = ['#', '/', '"', ';', ','];

/// Trailing marker on an output type token requesting a byte swap.
pub const SWAP_MARKER: char = 'E';

pub const DEFAULT_OUTPUT_TYPES: [&str; 3] = ["hex", "int", "bin"];
pub const DEFAULT_CONDITION: &str = "true";

pub const NAME_PART: usize = 0;
pub const LENGTH_PART: usize = 1;
pub const TYPES_PART: usize = 2;
pub const CONDITION_PART: usize = 3;

/// First selectable year of study (years are 1-indexed)
pub const MIN_YEAR: u8 = 1;

/// Largest year span any class can have (upper secondary runs 5 years)
pub const MAX_YEAR_SPAN: u8 = 5;

/// Year span used when the class value is unrecognized or unset
pub const DEFAULT_YEAR_SPAN: u8 = 5;

/// Form value identifying lower secondary school (3-year track)
pub const LOWER_SECONDARY: &str = "sec1";
/// Form value identifying upper secondary school (5-year track)
pub const UPPER_SECONDARY: &str = "sec2";

/// Year span for lower secondary school
pub const LOWER_SECONDARY_SPAN: u8 = 3;
/// Year span for upper secondary school
pub const UPPER_SECONDARY_SPAN: u8 = 5;

//! Stable error codes surfaced in messages and via `code()`.

pub const INPUT_NO_ROWS: &str = "GRIDDIFF_INPUT_001";
pub const INPUT_NO_COLUMNS: &str = "GRIDDIFF_INPUT_002";
pub const INPUT_RAGGED: &str = "GRIDDIFF_INPUT_003";
pub const INPUT_TOO_LARGE: &str = "GRIDDIFF_INPUT_004";
pub const INPUT_DUPLICATE_SHEET: &str = "GRIDDIFF_INPUT_005";

pub const DIFF_INVALID_INPUT: &str = "GRIDDIFF_DIFF_001";
pub const DIFF_LIMITS_EXCEEDED: &str = "GRIDDIFF_DIFF_002";
pub const DIFF_INVALID_CONFIG: &str = "GRIDDIFF_DIFF_003";
pub const DIFF_SHEET: &str = "GRIDDIFF_DIFF_004";
pub const DIFF_INVALID_WORKBOOK: &str = "GRIDDIFF_DIFF_005";

pub const CONFIG_NON_POSITIVE_LIMIT: &str = "GRIDDIFF_CONFIG_001";

pub const TOKEN_PARSE: &str = "GRIDDIFF_TOKEN_001";

pub const XLSX_IO: &str = "GRIDDIFF_XLSX_001";
pub const XLSX_NOT_ZIP: &str = "GRIDDIFF_XLSX_002";
pub const XLSX_MISSING_PART: &str = "GRIDDIFF_XLSX_003";
pub const XLSX_PART_TOO_LARGE: &str = "GRIDDIFF_XLSX_004";
pub const XLSX_XML: &str = "GRIDDIFF_XLSX_005";
pub const XLSX_INVALID_CELL: &str = "GRIDDIFF_XLSX_006";

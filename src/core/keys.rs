//! Reserved keys of the canonical chart payload.

pub const Y: &str = "y";
pub const X: &str = "x";
pub const Z: &str = "z";
pub const VARS: &str = "vars";
pub const SMPS: &str = "smps";
pub const DATA: &str = "data";
pub const CORS: &str = "cors";
pub const VENN: &str = "venn";
pub const LEGEND: &str = "legend";
pub const NODES: &str = "nodes";
pub const EDGES: &str = "edges";
pub const TRACKS: &str = "tracks";
pub const RAW: &str = "raw";

pub const INDEX: &str = "index";
pub const COLUMNS: &str = "columns";

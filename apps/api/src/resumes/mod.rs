// Resume analysis: upload validation, ATS presentation, analyze-then-match flow.
// Parsing and scoring happen in the Job API; this module only shapes results.

pub mod ats;
pub mod handlers;

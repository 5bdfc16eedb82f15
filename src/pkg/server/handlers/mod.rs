pub mod companies;
pub mod directory;
pub mod job_finder;
pub mod jobs;
pub mod probes;
pub mod resources;
pub mod roundup;
pub mod subscribe;

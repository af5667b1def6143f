pub mod capture_provider;
pub mod recording_delegate;

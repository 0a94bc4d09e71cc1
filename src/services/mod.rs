//! Service layer: the merge protocol, the assistant session and the
//! simulators that read the current spec.

pub mod assistant_session;
pub mod cost_estimator;
pub mod power_telemetry;
pub mod proposal_merge;
pub mod weather_particles;

pub use assistant_session::{AssistantSession, ProposalOutcome};
pub use power_telemetry::{LoadProfile, LoadStatus, PowerTelemetry, TelemetrySnapshot};
pub use proposal_merge::{merge, merge_value, Advisory, MergeOutcome};
pub use weather_particles::{WeatherParticle, WeatherSimulator};

mod catalog;
mod store;

pub use catalog::{
    BreathingSeed, Catalog, CheckInSeed, CoachSeed, Event, ProfileSeed, ProfileStat, Resource,
    SleepSeed, TodaySeed, TrendPoint, WindDownSeed,
};
pub use store::ContentStore;

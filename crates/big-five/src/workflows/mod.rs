pub mod assessment;
pub mod delivery;
pub mod eligibility;
pub mod roster;

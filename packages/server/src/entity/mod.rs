pub mod auth_token;
pub mod competition;
pub mod competition_registration;
pub mod portfolio_item;
pub mod service_lead;
pub mod user;
pub mod workshop;
pub mod workshop_registration;

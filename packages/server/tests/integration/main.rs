
mod competition;
mod portfolio;
mod users;
mod workshop;

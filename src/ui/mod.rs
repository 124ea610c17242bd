pub mod app;
mod board;
mod dialogs;
mod hud;
mod records;
mod state;

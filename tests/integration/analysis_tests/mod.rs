mod api;
mod atmosphere;
mod config;
mod integrator;
mod linearize;
mod modes;
mod sweep;
mod trim;

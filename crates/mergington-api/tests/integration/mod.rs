mod activities;
mod participation;
mod server;

mod common;
mod guard;
mod session;

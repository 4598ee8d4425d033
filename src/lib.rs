pub mod leaderboard;
pub mod obstacle;
pub mod player;
pub mod presenter;
pub mod remote;
pub mod service;
pub mod session;
pub mod settings;
pub mod sfx;
pub mod world;

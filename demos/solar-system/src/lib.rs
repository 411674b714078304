use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod builder;
mod game;
mod info;
mod kinematics;
mod selection;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

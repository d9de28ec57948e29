//! Headless demo runner for the city scene core.
//!
//! Generates the default scenario and ticks the motion and signal
//! simulators at 60 Hz without a renderer attached. The dashboard embeds
//! the same plugins behind its own render layer.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use cityscene::CityScenePlugin;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(CityScenePlugin)
        .run();
}

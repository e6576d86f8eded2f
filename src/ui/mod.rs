pub mod battle_scene;
pub mod game_common;
pub mod menu_scene;

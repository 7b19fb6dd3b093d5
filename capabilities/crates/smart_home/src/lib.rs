// capabilities/crates/smart_home/src/lib.rs

//! Smart-home tools: homes, rooms and accessories on `interface_1`; scenes
//! and automations on `interface_2`.

pub mod attributes;
pub mod fixtures;
pub mod lookup;
pub mod tables;

mod add_action_to_scene;
mod add_new_device;
mod add_new_home;
mod create_automation;
mod create_automation_trigger;
mod create_home_scene;
mod create_room;
mod delete_home_scene;
mod edit_scene;
mod list_accessories;
mod manage_automation;
mod remove_home;

use mock_store_core::Interface;

pub use add_action_to_scene::AddActionToScene;
pub use add_new_device::{default_serial, AddNewDevice};
pub use add_new_home::AddNewHome;
pub use create_automation::CreateAutomation;
pub use create_automation_trigger::CreateAutomationTrigger;
pub use create_home_scene::CreateHomeScene;
pub use create_room::CreateRoom;
pub use delete_home_scene::DeleteHomeScene;
pub use edit_scene::EditScene;
pub use list_accessories::ListAccessories;
pub use manage_automation::ManageAutomation;
pub use remove_home::RemoveHome;

pub const DOMAIN: &str = "smart_home";

pub fn interface_1() -> Interface {
    Interface::new("interface_1", "Home setup: homes, rooms, accessories")
        .with_tool(AddNewHome)
        .with_tool(CreateRoom)
        .with_tool(AddNewDevice)
        .with_tool(ListAccessories)
        .with_tool(RemoveHome)
}

pub fn interface_2() -> Interface {
    Interface::new("interface_2", "Scenes and automations")
        .with_tool(CreateHomeScene)
        .with_tool(AddActionToScene)
        .with_tool(EditScene)
        .with_tool(DeleteHomeScene)
        .with_tool(CreateAutomation)
        .with_tool(CreateAutomationTrigger)
        .with_tool(ManageAutomation)
}

pub fn interfaces() -> Vec<Interface> {
    vec![interface_1(), interface_2()]
}

// capabilities/crates/wiki_pages/src/lib.rs

//! Wiki tools. `interface_1` manages documents and their versions;
//! `interface_2` manages access permissions and attachments.

pub mod documents;
pub mod fixtures;
pub mod tables;

mod add_attachment_entity;
mod alter_document;
mod collect_document_versions;
mod delete_document;
mod get_user_permissions;
mod grant_access_permission;
mod insert_document;
mod modify_access_permission;
mod retrieve_document;

use mock_store_core::Interface;

pub use add_attachment_entity::AddAttachmentEntity;
pub use alter_document::AlterDocument;
pub use collect_document_versions::CollectDocumentVersions;
pub use delete_document::DeleteDocument;
pub use get_user_permissions::GetUserPermissions;
pub use grant_access_permission::GrantAccessPermission;
pub use insert_document::InsertDocument;
pub use modify_access_permission::ModifyAccessPermission;
pub use retrieve_document::RetrieveDocument;

pub const DOMAIN: &str = "wiki_pages";

pub fn interface_1() -> Interface {
    Interface::new("interface_1", "Documents and versions")
        .with_tool(InsertDocument)
        .with_tool(AlterDocument)
        .with_tool(RetrieveDocument)
        .with_tool(CollectDocumentVersions)
        .with_tool(DeleteDocument)
}

pub fn interface_2() -> Interface {
    Interface::new("interface_2", "Access permissions and attachments")
        .with_tool(GrantAccessPermission)
        .with_tool(ModifyAccessPermission)
        .with_tool(GetUserPermissions)
        .with_tool(AddAttachmentEntity)
}

pub fn interfaces() -> Vec<Interface> {
    vec![interface_1(), interface_2()]
}

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::repo::CatalogModule;
use crate::response::ApiMessage;
use crate::storage::StorageClient;

/// Module view with the icon resolved to its public URL. Field names follow
/// the catalog API: the entry name is `module`, its children `submodule`.
#[derive(Debug, Serialize)]
pub struct ModuleView {
    pub id: Uuid,
    pub module: String,
    pub submodule: Vec<String>,
    pub description: String,
    pub icon: String,
}

impl ModuleView {
    pub fn from_module(module: &CatalogModule, storage: &dyn StorageClient) -> Self {
        Self {
            id: module.id,
            module: module.name.clone(),
            submodule: module.submodules.clone(),
            description: module.description.clone(),
            icon: storage.public_url(&module.icon),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
pub struct ListModulesResponse {
    pub message: Vec<ApiMessage>,
    #[serde(rename = "getAllModules")]
    pub modules: Vec<ModuleView>,
}

#[derive(Debug, Serialize)]
pub struct ModuleByIdResponse {
    pub message: Vec<ApiMessage>,
    #[serde(rename = "moduleById")]
    pub module: ModuleView,
}

#[derive(Debug, Serialize)]
pub struct UpdatedModuleResponse {
    pub message: Vec<ApiMessage>,
    #[serde(rename = "updated_modules")]
    pub module: ModuleView,
}

#[derive(Debug, Serialize)]
pub struct DeletedModuleResponse {
    pub message: Vec<ApiMessage>,
    #[serde(rename = "deleted_module")]
    pub module: ModuleView,
}

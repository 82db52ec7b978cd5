use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::accounts::workflows::asset_key;
use crate::catalog::dto::{
    DeletedModuleResponse, ListModulesResponse, MessageResponse, ModuleByIdResponse, ModuleView,
    UpdatedModuleResponse,
};
use crate::catalog::repo::CatalogModule;
use crate::forms::{ParsedForm, UploadFile};
use crate::response::{ApiError, ApiMessage};
use crate::state::AppState;

const ICON_CAP: usize = 5 * 1024 * 1024;
const ICON_PREFIX: &str = "module";

fn split_submodules(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn reject_duplicate_name(existing: Option<&CatalogModule>) -> Result<(), ApiError> {
    if existing.is_some() {
        return Err(ApiError::Duplicate("Module Name already exists".into()));
    }
    Ok(())
}

fn check_icon(file: &UploadFile) -> Result<(), ApiError> {
    if file.size() > ICON_CAP {
        return Err(ApiError::Validation(
            "Module icon size exceeds the 5MB limit".into(),
        ));
    }
    Ok(())
}

#[instrument(skip(state, mp))]
pub async fn create_module(
    State(state): State<AppState>,
    mp: Multipart,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let form = ParsedForm::read(mp).await?;

    let name = form.required("module")?.to_string();
    let description = form.required("description")?.to_string();
    let submodules = split_submodules(form.required("submodule")?);
    if submodules.is_empty() {
        return Err(ApiError::Validation("Required fields".into()));
    }

    reject_duplicate_name(CatalogModule::find_by_name(&state.db, &name).await?.as_ref())?;

    let file = form
        .file
        .as_ref()
        .ok_or_else(|| ApiError::Validation("Module icon is required".into()))?;
    check_icon(file)?;

    let key = asset_key(ICON_PREFIX, &file.file_name);
    state
        .storage
        .put_object(&key, file.bytes.clone(), &file.content_type)
        .await
        .map_err(ApiError::Internal)?;

    let module = CatalogModule::create(&state.db, &name, &submodules, &description, &key).await?;

    info!(module_id = %module.id, name = %module.name, "module created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: ApiMessage::success("Module Added Successfully"),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_all_modules(
    State(state): State<AppState>,
) -> Result<Json<ListModulesResponse>, ApiError> {
    let modules = CatalogModule::list(&state.db).await?;
    let views = modules
        .iter()
        .map(|m| ModuleView::from_module(m, state.storage.as_ref()))
        .collect();
    Ok(Json(ListModulesResponse {
        message: ApiMessage::success("modules Retrieved successfully"),
        modules: views,
    }))
}

#[instrument(skip(state))]
pub async fn get_module_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModuleByIdResponse>, ApiError> {
    let module = CatalogModule::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Module not found".into()))?;
    Ok(Json(ModuleByIdResponse {
        message: ApiMessage::success("Module Id based Retrieved successfully"),
        module: ModuleView::from_module(&module, state.storage.as_ref()),
    }))
}

#[instrument(skip(state, mp))]
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mp: Multipart,
) -> Result<Json<UpdatedModuleResponse>, ApiError> {
    let form = ParsedForm::read(mp).await?;

    let existing = CatalogModule::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Module not found".into()))?;

    let name = form.required("module")?.to_string();
    let description = form.required("description")?.to_string();
    let submodules = split_submodules(form.required("submodule")?);
    if submodules.is_empty() {
        return Err(ApiError::Validation("Required fields".into()));
    }

    let mut new_icon = None;
    if let Some(file) = form.file.as_ref() {
        check_icon(file)?;

        // Replace the stored icon; a failed delete is logged, not fatal.
        if let Err(e) = state.storage.delete_object(&existing.icon).await {
            warn!(error = ?e, key = %existing.icon, "failed to delete replaced icon");
        }

        let key = asset_key(ICON_PREFIX, &file.file_name);
        state
            .storage
            .put_object(&key, file.bytes.clone(), &file.content_type)
            .await
            .map_err(ApiError::Internal)?;
        new_icon = Some(key);
    }

    let updated =
        CatalogModule::update(&state.db, id, &name, &submodules, &description, new_icon.as_deref())
            .await?
            .ok_or_else(|| ApiError::NotFound("Module not found".into()))?;

    info!(module_id = %id, "module updated");
    Ok(Json(UpdatedModuleResponse {
        message: ApiMessage::success("Module updated successfully"),
        module: ModuleView::from_module(&updated, state.storage.as_ref()),
    }))
}

#[instrument(skip(state))]
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedModuleResponse>, ApiError> {
    let deleted = CatalogModule::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Module not found".into()))?;

    if let Err(e) = state.storage.delete_object(&deleted.icon).await {
        warn!(error = ?e, key = %deleted.icon, "failed to delete module icon");
    }

    info!(module_id = %id, "module deleted");
    Ok(Json(DeletedModuleResponse {
        message: ApiMessage::success("modules deleted successfully"),
        module: ModuleView::from_module(&deleted, state.storage.as_ref()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn submodules_split_on_commas_and_drop_blanks() {
        assert_eq!(
            split_submodules("Openings, Applicants ,,Offers"),
            vec!["Openings", "Applicants", "Offers"]
        );
        assert!(split_submodules(" , ").is_empty());
    }

    #[test]
    fn icon_cap_is_five_megabytes() {
        let under = UploadFile {
            file_name: "icon.png".into(),
            content_type: "image/png".into(),
            bytes: Bytes::from(vec![0u8; ICON_CAP]),
        };
        assert!(check_icon(&under).is_ok());

        let over = UploadFile {
            file_name: "icon.png".into(),
            content_type: "image/png".into(),
            bytes: Bytes::from(vec![0u8; ICON_CAP + 1]),
        };
        assert!(check_icon(&over).is_err());
    }

    #[test]
    fn taken_module_name_is_rejected_as_a_duplicate() {
        let existing = CatalogModule {
            id: uuid::Uuid::new_v4(),
            name: "Hiring".into(),
            submodules: vec!["Openings".into()],
            description: "Hiring pipeline".into(),
            icon: "module/1_icon.png".into(),
            created_at: time::OffsetDateTime::now_utc(),
        };

        let err = reject_duplicate_name(Some(&existing)).unwrap_err();
        assert!(matches!(err, ApiError::Duplicate(_)));
        assert_eq!(err.to_string(), "Module Name already exists");

        assert!(reject_duplicate_name(None).is_ok());
    }
}

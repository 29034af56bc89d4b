pub mod folders;
pub mod manage;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolSysError};
use crate::middlewares::RequireJWT;
use crate::models::staff::entities::Staff;
use crate::models::users::entities::{User, UserRole};
use crate::models::work_items::{
    requests::{
        FileMetadataQuery, InitializeFoldersRequest, TeacherWorkItemRequest, TrackAccessRequest,
        WorkItemRequest, WorkLookupQuery,
    },
    responses::{SubjectProgress, TeacherWorkOverview},
};
use crate::services::{
    define_service, drive_client, error_response, found, respond, respond_created, respond_empty,
    upload_error_response,
};
use crate::storage::Storage;
use crate::utils::multipart::{UploadRules, WORK_FILE_EXTENSIONS, read_single_file};

define_service!(WorkItemService);

pub(crate) const NOT_FOUND: &str = "Work item not found";
// 公开教师详情页按文档类型展示文件
pub(crate) const WORK_ITEM_CONTENT: &str = "work_item";
pub(crate) const WORK_FILE_CONTENT: &str = "work_file";
pub(crate) const WORK_FILE_MAX_SIZE: usize = 10 * 1024 * 1024;
pub(crate) const WORK_FILE_RULES: UploadRules<'static> = UploadRules {
    allowed_extensions: WORK_FILE_EXTENSIONS,
    max_size: WORK_FILE_MAX_SIZE,
};

/// 当前用户可操作的教职工范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StaffScope {
    All,
    // 教师只能操作自己的记录
    Own(i64),
}

impl StaffScope {
    pub(crate) fn check(&self, staff_id: i64, message: &str) -> Result<()> {
        match self {
            StaffScope::Own(own) if *own != staff_id => Err(SchoolSysError::authorization(message)),
            _ => Ok(()),
        }
    }
}

fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user_claims(request)
        .ok_or_else(|| SchoolSysError::authentication("Authentication required"))
}

async fn own_staff(storage: &dyn Storage, user: &User) -> Result<Staff> {
    storage
        .get_staff_by_user_id(user.id)
        .await?
        .ok_or_else(|| SchoolSysError::authorization("Staff record not found"))
}

async fn resolve_scope(storage: &dyn Storage, request: &HttpRequest) -> Result<StaffScope> {
    let user = current_user(request)?;
    if user.role != UserRole::Teacher {
        return Ok(StaffScope::All);
    }
    Ok(StaffScope::Own(own_staff(storage, &user).await?.id))
}

async fn teacher_overview(storage: &dyn Storage, request: &HttpRequest) -> Result<TeacherWorkOverview> {
    let user = current_user(request)?;
    let teacher = own_staff(storage, &user).await?;
    let progress = folders::teacher_progress(storage, &teacher).await?;
    Ok(TeacherWorkOverview { teacher, progress })
}

async fn scoped_progress(
    storage: &dyn Storage,
    request: &HttpRequest,
    staff_id: i64,
) -> Result<Vec<SubjectProgress>> {
    let scope = resolve_scope(storage, request).await?;
    scope.check(staff_id, "You can only view your own progress")?;
    let teacher = found(storage.get_staff_by_id(staff_id).await?, "Teacher not found")?;
    folders::teacher_progress(storage, &teacher).await
}

impl WorkItemService {
    // 管理员：文档类型、任课教师与整体统计
    pub async fn index(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            manage::overview(storage.as_ref()).await,
            "Work items retrieved successfully",
        )
    }

    pub async fn store(&self, body: WorkItemRequest, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = match current_user(request) {
            Ok(user) => manage::create(storage.as_ref(), body, &user.role).await,
            Err(e) => Err(e),
        };
        respond_created(result, "Work item created successfully")
    }

    pub async fn update(
        &self,
        id: i64,
        body: WorkItemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            manage::update(storage.as_ref(), id, body).await,
            "Work item updated successfully",
        )
    }

    pub async fn destroy(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond_empty(
            manage::destroy(storage.as_ref(), client.as_ref(), id).await,
            "Work item and associated files deleted successfully",
        )
    }

    pub async fn stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            manage::stats(storage.as_ref()).await,
            "Work item statistics retrieved successfully",
        )
    }

    // 教师：自己的完成情况
    pub async fn teacher_index(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            teacher_overview(storage.as_ref(), request).await,
            "Work progress retrieved successfully",
        )
    }

    pub async fn store_teacher(
        &self,
        body: TeacherWorkItemRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond_created(
            manage::create_for_teacher(storage.as_ref(), body).await,
            "Work item created successfully",
        )
    }

    pub async fn destroy_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        respond_empty(
            manage::destroy_for_teacher(storage.as_ref(), client.as_ref(), id).await,
            "Work item and associated files deleted successfully",
        )
    }

    pub async fn initialize_folders(
        &self,
        body: InitializeFoldersRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        let result = match resolve_scope(storage.as_ref(), request).await {
            Ok(scope) => folders::initialize_folders(storage.as_ref(), client.as_ref(), scope, body).await,
            Err(e) => Err(e),
        };
        respond(result, "Work folders initialized successfully")
    }

    pub async fn upload_file(&self, payload: Multipart, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        let scope = match resolve_scope(storage.as_ref(), request).await {
            Ok(scope) => scope,
            Err(e) => return Ok(error_response(&e)),
        };
        let file = match read_single_file(payload, WORK_FILE_RULES).await {
            Ok(file) => file,
            Err(e) => return Ok(upload_error_response(e)),
        };
        respond_created(
            folders::upload_file(storage.as_ref(), client.as_ref(), scope, file).await,
            "File uploaded successfully",
        )
    }

    pub async fn delete_file(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let client = drive_client(request)?;
        let result = match resolve_scope(storage.as_ref(), request).await {
            Ok(scope) => folders::delete_file(storage.as_ref(), client.as_ref(), scope, id).await,
            Err(e) => Err(e),
        };
        respond_empty(result, "File deleted successfully")
    }

    pub async fn file_metadata(&self, query: FileMetadataQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let client = drive_client(request)?;
        respond(
            folders::file_metadata(client.as_ref(), &query.file_url).await,
            "File metadata retrieved successfully",
        )
    }

    pub async fn lookup(&self, query: WorkLookupQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = match resolve_scope(storage.as_ref(), request).await {
            Ok(scope) => folders::lookup(storage.as_ref(), scope, query).await,
            Err(e) => Err(e),
        };
        respond(result, "Teacher subject work retrieved successfully")
    }

    pub async fn teacher_progress(&self, staff_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        respond(
            scoped_progress(storage.as_ref(), request, staff_id).await,
            "Work progress retrieved successfully",
        )
    }

    pub async fn track_access(
        &self,
        id: i64,
        body: TrackAccessRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let result = match resolve_scope(storage.as_ref(), request).await {
            Ok(scope) => folders::track_access(storage.as_ref(), scope, id, body.action).await,
            Err(e) => Err(e),
        };
        respond(result, "File access tracked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use crate::utils::multipart::tests::{Part, multipart_payload, padded};

    #[actix_web::test]
    async fn test_work_file_upload_limits() {
        let pdf = padded(b"%PDF-1.7", WORK_FILE_MAX_SIZE);
        let payload = multipart_payload(
            &[Part::Field("teacher_subject_work_id", "4"), Part::File("prota.pdf", &pdf)],
            256 * 1024,
        );
        let file = read_single_file(payload, WORK_FILE_RULES).await.unwrap();
        assert_eq!(file.data.len(), WORK_FILE_MAX_SIZE);
        assert_eq!(file.fields["teacher_subject_work_id"], "4");

        let pdf = padded(b"%PDF-1.7", WORK_FILE_MAX_SIZE + 1);
        let payload = multipart_payload(&[Part::File("prota.pdf", &pdf)], 256 * 1024);
        let err = read_single_file(payload, WORK_FILE_RULES).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileSizeExceeded);
        assert_eq!(err.message, "File size exceeds the limit of 10 MB");

        let payload = multipart_payload(&[Part::File("rekaman.mp4", b"\x00\x00\x00\x18ftypmp42")], 1024);
        let err = read_single_file(payload, WORK_FILE_RULES).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTypeNotAllowed);
    }

    #[test]
    fn test_scope_restricts_teachers_to_own_records() {
        assert!(StaffScope::All.check(7, "denied").is_ok());
        assert!(StaffScope::Own(7).check(7, "denied").is_ok());
        let err = StaffScope::Own(7).check(8, "denied").unwrap_err();
        assert_eq!(err.message(), "denied");
    }
}

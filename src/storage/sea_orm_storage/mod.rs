//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod classes;
mod contacts;
mod dashboard;
mod extracurriculars;
mod facilities;
mod galleries;
mod google_drive;
mod homeroom;
mod pages;
pub(crate) mod posts;
pub(crate) mod staff;
pub(crate) mod students;
mod subjects;
mod users;
mod work_items;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSysError};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Select,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolSysError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolSysError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolSysError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolSysError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolSysError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 分页查询（page 从 1 开始）
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: u64,
        size: u64,
    ) -> std::result::Result<(Vec<E::Model>, PaginationInfo), DbErr>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let page = page.max(1);
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;
        Ok((items, PaginationInfo::new(page, size, total)))
    }

    /// 按外键分组计数，返回 id -> 数量
    pub(crate) async fn count_grouped<E, C>(
        &self,
        column: C,
        ids: &[i64],
    ) -> std::result::Result<HashMap<i64, i64>, DbErr>
    where
        E: EntityTrait<Column = C>,
        C: ColumnTrait,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(i64, i64)> = E::find()
            .select_only()
            .column(column)
            .column_as(Expr::expr(Func::count(Expr::col(column))), "count")
            .filter(column.is_in(ids.iter().copied()))
            .group_by(column)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 测试用内存数据库（已执行迁移）
    pub(crate) async fn new_in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .expect("failed to open in-memory sqlite");
        Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");
        Self { db }
    }
}

// Storage trait 实现
use crate::models::{
    PaginatedResponse,
    activities::entities::{NewActivity, UserActivity},
    classes::{
        entities::SchoolClass,
        requests::{ClassQueryParams, ClassRequest},
        responses::{ClassListResponse, ClassStatistics},
    },
    contacts::{
        entities::Contact,
        requests::{ContactListParams, ContactRequest},
        responses::ContactListResponse,
    },
    dashboard::responses::DashboardMetrics,
    extracurriculars::{
        entities::Extracurricular,
        requests::{ExtracurricularListParams, ExtracurricularRequest},
        responses::{ExtracurricularListResponse, ExtracurricularWithCount},
    },
    facilities::{
        entities::Facility,
        requests::{FacilityListParams, FacilityRequest},
        responses::FacilityListResponse,
    },
    galleries::{
        entities::{Gallery, GalleryItem},
        requests::{GalleryChanges, GalleryItemData, GalleryItemPlan, GalleryListParams, GalleryOrder},
        responses::GalleryListResponse,
    },
    google_drive::{entities::GoogleDriveToken, requests::NewDriveToken},
    pages::{
        entities::Page,
        requests::{PageListParams, PageRequest},
        responses::PageListResponse,
    },
    posts::{
        entities::{Post, PostCategory},
        requests::{PostChanges, PostListParams},
        responses::{PostListResponse, PostWithAuthor},
    },
    staff::{
        entities::{PositionHistory, Staff},
        requests::{PositionHistoryRequest, StaffListParams, StaffRequest},
        responses::StaffListResponse,
    },
    students::{
        entities::Student,
        requests::{StudentListParams, StudentRequest},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{SubjectListParams, SubjectRequest},
        responses::{SubjectListResponse, TeacherAssignment},
    },
    users::{
        entities::User,
        requests::{NewUser, UserChanges, UserListParams},
        responses::UserListResponse,
    },
    work_items::{
        entities::{TeacherSubjectWork, TeacherWorkFile, WorkItem},
        requests::NewWorkFile,
    },
};

use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UserChanges) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn delete_users(&self, ids: &[i64]) -> Result<u64> {
        self.delete_users_impl(ids).await
    }

    async fn count_existing_users(&self, ids: &[i64]) -> Result<u64> {
        self.count_existing_users_impl(ids).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_staff_with_pagination(&self, query: StaffListParams, divisions: Vec<String>,) -> Result<StaffListResponse> {
        self.list_staff_with_pagination_impl(query, divisions).await
    }

    async fn list_all_staff(&self) -> Result<Vec<Staff>> {
        self.list_all_staff_impl().await
    }

    async fn get_staff_by_id(&self, id: i64) -> Result<Option<Staff>> {
        self.get_staff_by_id_impl(id).await
    }

    async fn get_staff_by_slug(&self, slug: &str) -> Result<Option<Staff>> {
        self.get_staff_by_slug_impl(slug).await
    }

    async fn get_staff_by_user_id(&self, user_id: i64) -> Result<Option<Staff>> {
        self.get_staff_by_user_id_impl(user_id).await
    }

    async fn list_staff_by_ids(&self, ids: &[i64]) -> Result<Vec<Staff>> {
        self.list_staff_by_ids_impl(ids).await
    }

    async fn staff_email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.staff_email_taken_impl(email, exclude_id).await
    }

    async fn staff_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.staff_slug_exists_impl(slug, exclude_id).await
    }

    async fn create_staff(&self, staff: StaffRequest, slug: String) -> Result<Staff> {
        self.create_staff_impl(staff, slug).await
    }

    async fn update_staff(&self, id: i64, staff: StaffRequest, slug: String) -> Result<Option<Staff>> {
        self.update_staff_impl(id, staff, slug).await
    }

    async fn delete_staff(&self, id: i64) -> Result<bool> {
        self.delete_staff_impl(id).await
    }

    async fn delete_staff_many(&self, ids: &[i64]) -> Result<u64> {
        self.delete_staff_many_impl(ids).await
    }

    async fn list_staff_subjects(&self, staff_id: i64) -> Result<Vec<Subject>> {
        self.list_staff_subjects_impl(staff_id).await
    }

    async fn sync_staff_subjects(&self, staff_id: i64, subject_ids: &[i64]) -> Result<()> {
        self.sync_staff_subjects_impl(staff_id, subject_ids).await
    }

    async fn remove_staff_subject(&self, staff_id: i64, subject_id: i64) -> Result<bool> {
        self.remove_staff_subject_impl(staff_id, subject_id).await
    }

    async fn list_eligible_teachers(&self, search: Option<String>, page: u64, size: u64,) -> Result<PaginatedResponse<TeacherAssignment>> {
        self.list_eligible_teachers_impl(search, page, size).await
    }

    async fn list_position_history(&self, staff_id: i64) -> Result<Vec<PositionHistory>> {
        self.list_position_history_impl(staff_id).await
    }


    async fn create_position_history(&self, history: PositionHistoryRequest,) -> Result<PositionHistory> {
        self.create_position_history_impl(history).await
    }

    async fn update_position_history(&self, id: i64, history: PositionHistoryRequest,) -> Result<Option<PositionHistory>> {
        self.update_position_history_impl(id, history).await
    }

    async fn delete_position_history(&self, id: i64) -> Result<bool> {
        self.delete_position_history_impl(id).await
    }

    async fn delete_position_histories(&self, ids: &[i64]) -> Result<u64> {
        self.delete_position_histories_impl(ids).await
    }

    async fn list_subjects_with_pagination(&self, query: SubjectListParams,) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn list_all_subjects(&self) -> Result<Vec<Subject>> {
        self.list_all_subjects_impl().await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn subject_code_taken(&self, code: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.subject_code_taken_impl(code, exclude_id).await
    }

    async fn create_subject(&self, subject: SubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn update_subject(&self, id: i64, subject: SubjectRequest) -> Result<Option<Subject>> {
        self.update_subject_impl(id, subject).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn delete_subjects(&self, ids: &[i64]) -> Result<u64> {
        self.delete_subjects_impl(ids).await
    }

    async fn list_subject_staff(&self, subject_id: i64) -> Result<Vec<Staff>> {
        self.list_subject_staff_impl(subject_id).await
    }

    async fn sync_subject_staff(&self, subject_id: i64, staff_ids: &[i64]) -> Result<()> {
        self.sync_subject_staff_impl(subject_id, staff_ids).await
    }

    async fn remove_subject_staff(&self, subject_id: i64, staff_id: i64) -> Result<bool> {
        self.remove_subject_staff_impl(subject_id, staff_id).await
    }

    async fn list_students_with_pagination(&self, query: StudentListParams,) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn student_nisn_taken(&self, nisn: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.student_nisn_taken_impl(nisn, exclude_id).await
    }

    async fn create_student(&self, student: StudentRequest, homeroom_teacher_id: Option<i64>,) -> Result<Student> {
        self.create_student_impl(student, homeroom_teacher_id).await
    }

    async fn update_student(&self, id: i64, student: StudentRequest, homeroom_teacher_id: Option<i64>,) -> Result<Option<Student>> {
        self.update_student_impl(id, student, homeroom_teacher_id).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn delete_students(&self, ids: &[i64]) -> Result<u64> {
        self.delete_students_impl(ids).await
    }

    async fn count_existing_students(&self, ids: &[i64]) -> Result<u64> {
        self.count_existing_students_impl(ids).await
    }

    async fn list_student_extracurriculars(&self, student_id: i64) -> Result<Vec<Extracurricular>> {
        self.list_student_extracurriculars_impl(student_id).await
    }

    async fn list_students_in_class(&self, class_name: &str) -> Result<Vec<Student>> {
        self.list_students_in_class_impl(class_name).await
    }

    async fn count_students_by_class(&self) -> Result<HashMap<String, i64>> {
        self.count_students_by_class_impl().await
    }


    async fn list_classes_with_pagination(&self, query: ClassQueryParams,) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn list_classes(&self, grade_level: Option<String>) -> Result<Vec<SchoolClass>> {
        self.list_classes_impl(grade_level).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<SchoolClass>> {
        self.get_class_by_id_impl(id).await
    }

    async fn get_class_by_name(&self, name: &str) -> Result<Option<SchoolClass>> {
        self.get_class_by_name_impl(name).await
    }

    async fn create_class(&self, class: ClassRequest) -> Result<SchoolClass> {
        self.create_class_impl(class).await
    }

    async fn update_class(&self, id: i64, class: ClassRequest) -> Result<Option<SchoolClass>> {
        self.update_class_impl(id, class).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    async fn class_statistics(&self) -> Result<ClassStatistics> {
        self.class_statistics_impl().await
    }


    async fn get_homeroom_teacher_for_class(&self, class_name: &str) -> Result<Option<Staff>> {
        self.get_homeroom_teacher_for_class_impl(class_name).await
    }

    async fn assign_homeroom(&self, staff_id: i64, class_name: &str) -> Result<u64> {
        self.assign_homeroom_impl(staff_id, class_name).await
    }

    async fn remove_homeroom(&self, staff_id: i64, class_name: &str) -> Result<u64> {
        self.remove_homeroom_impl(staff_id, class_name).await
    }

    async fn set_class_homeroom_teacher(&self, class_name: &str, staff_id: i64) -> Result<u64> {
        self.set_class_homeroom_teacher_impl(class_name, staff_id).await
    }

    async fn list_extracurriculars_with_pagination(&self, query: ExtracurricularListParams,) -> Result<ExtracurricularListResponse> {
        self.list_extracurriculars_with_pagination_impl(query).await
    }

    async fn list_all_extracurriculars(&self) -> Result<Vec<ExtracurricularWithCount>> {
        self.list_all_extracurriculars_impl().await
    }

    async fn get_extracurricular_by_id(&self, id: i64) -> Result<Option<Extracurricular>> {
        self.get_extracurricular_by_id_impl(id).await
    }

    async fn extracurricular_name_taken(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.extracurricular_name_taken_impl(name, exclude_id).await
    }

    async fn create_extracurricular(&self, extracurricular: ExtracurricularRequest,) -> Result<Extracurricular> {
        self.create_extracurricular_impl(extracurricular).await
    }

    async fn update_extracurricular(&self, id: i64, extracurricular: ExtracurricularRequest,) -> Result<Option<Extracurricular>> {
        self.update_extracurricular_impl(id, extracurricular).await
    }

    async fn delete_extracurricular(&self, id: i64) -> Result<bool> {
        self.delete_extracurricular_impl(id).await
    }

    async fn delete_extracurriculars(&self, ids: &[i64]) -> Result<u64> {
        self.delete_extracurriculars_impl(ids).await
    }

    async fn list_extracurricular_students(&self, id: i64) -> Result<Vec<Student>> {
        self.list_extracurricular_students_impl(id).await
    }

    async fn attach_extracurricular_students(&self, id: i64, student_ids: &[i64]) -> Result<u64> {
        self.attach_extracurricular_students_impl(id, student_ids).await
    }

    async fn detach_extracurricular_student(&self, id: i64, student_id: i64) -> Result<bool> {
        self.detach_extracurricular_student_impl(id, student_id).await
    }

    async fn list_posts_with_pagination(&self, query: PostListParams) -> Result<PostListResponse> {
        self.list_posts_with_pagination_impl(query).await
    }

    async fn list_published_posts(&self, category: Option<PostCategory>, search: Option<String>, page: u64, size: u64,) -> Result<PostListResponse> {
        self.list_published_posts_impl(category, search, page, size).await
    }

    async fn latest_published_posts(&self, category: Option<PostCategory>, limit: u64,) -> Result<Vec<PostWithAuthor>> {
        self.latest_published_posts_impl(category, limit).await
    }

    async fn related_published_posts(&self, category: PostCategory, exclude_id: i64, limit: u64,) -> Result<Vec<PostWithAuthor>> {
        self.related_published_posts_impl(category, exclude_id, limit).await
    }

    async fn get_post_by_id(&self, id: i64) -> Result<Option<PostWithAuthor>> {
        self.get_post_by_id_impl(id).await
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostWithAuthor>> {
        self.get_post_by_slug_impl(slug).await
    }

    async fn post_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.post_slug_exists_impl(slug, exclude_id).await
    }

    async fn create_post(&self, user_id: Option<i64>, post: PostChanges) -> Result<Post> {
        self.create_post_impl(user_id, post).await
    }

    async fn update_post(&self, id: i64, post: PostChanges) -> Result<Option<Post>> {
        self.update_post_impl(id, post).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        self.delete_post_impl(id).await
    }

    async fn set_post_published(&self, id: i64, is_published: bool) -> Result<Option<Post>> {
        self.set_post_published_impl(id, is_published).await
    }

    async fn list_pages_with_pagination(&self, query: PageListParams) -> Result<PageListResponse> {
        self.list_pages_with_pagination_impl(query).await
    }

    async fn list_all_pages(&self) -> Result<Vec<Page>> {
        self.list_all_pages_impl().await
    }

    async fn get_page_by_id(&self, id: i64) -> Result<Option<Page>> {
        self.get_page_by_id_impl(id).await
    }

    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        self.get_page_by_slug_impl(slug).await
    }

    async fn page_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.page_slug_exists_impl(slug, exclude_id).await
    }

    async fn create_page(&self, page: PageRequest, image: Option<String>) -> Result<Page> {
        self.create_page_impl(page, image).await
    }

    async fn update_page(&self, id: i64, page: PageRequest, image: Option<String>,) -> Result<Option<Page>> {
        self.update_page_impl(id, page, image).await
    }

    async fn delete_page(&self, id: i64) -> Result<bool> {
        self.delete_page_impl(id).await
    }

    async fn list_facilities_with_pagination(&self, query: FacilityListParams,) -> Result<FacilityListResponse> {
        self.list_facilities_with_pagination_impl(query).await
    }

    async fn list_all_facilities(&self) -> Result<Vec<Facility>> {
        self.list_all_facilities_impl().await
    }

    async fn get_facility_by_id(&self, id: i64) -> Result<Option<Facility>> {
        self.get_facility_by_id_impl(id).await
    }

    async fn create_facility(&self, facility: FacilityRequest, photo: Option<String>,) -> Result<Facility> {
        self.create_facility_impl(facility, photo).await
    }

    async fn update_facility(&self, id: i64, facility: FacilityRequest, photo: Option<String>,) -> Result<Option<Facility>> {
        self.update_facility_impl(id, facility, photo).await
    }

    async fn delete_facility(&self, id: i64) -> Result<bool> {
        self.delete_facility_impl(id).await
    }

    async fn list_contacts_with_pagination(&self, query: ContactListParams,) -> Result<ContactListResponse> {
        self.list_contacts_with_pagination_impl(query).await
    }

    async fn latest_contact(&self) -> Result<Option<Contact>> {
        self.latest_contact_impl().await
    }

    async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>> {
        self.get_contact_by_id_impl(id).await
    }

    async fn create_contact(&self, contact: ContactRequest) -> Result<Contact> {
        self.create_contact_impl(contact).await
    }

    async fn update_contact(&self, id: i64, contact: ContactRequest) -> Result<Option<Contact>> {
        self.update_contact_impl(id, contact).await
    }

    async fn delete_contact(&self, id: i64) -> Result<bool> {
        self.delete_contact_impl(id).await
    }

    async fn list_galleries_with_pagination(&self, query: GalleryListParams,) -> Result<GalleryListResponse> {
        self.list_galleries_with_pagination_impl(query).await
    }

    async fn list_published_galleries(&self, search: Option<String>, page: u64, size: u64,) -> Result<GalleryListResponse> {
        self.list_published_galleries_impl(search, page, size).await
    }

    async fn latest_published_galleries(&self, exclude_id: Option<i64>, limit: u64,) -> Result<Vec<Gallery>> {
        self.latest_published_galleries_impl(exclude_id, limit).await
    }

    async fn get_gallery_by_id(&self, id: i64) -> Result<Option<Gallery>> {
        self.get_gallery_by_id_impl(id).await
    }

    async fn get_gallery_by_slug(&self, slug: &str) -> Result<Option<Gallery>> {
        self.get_gallery_by_slug_impl(slug).await
    }

    async fn gallery_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.gallery_slug_exists_impl(slug, exclude_id).await
    }

    async fn max_gallery_sort_order(&self) -> Result<Option<i32>> {
        self.max_gallery_sort_order_impl().await
    }

    async fn create_gallery(&self, gallery: GalleryChanges, items: Vec<GalleryItemData>,) -> Result<Gallery> {
        self.create_gallery_impl(gallery, items).await
    }

    async fn update_gallery(&self, id: i64, gallery: GalleryChanges, plan: GalleryItemPlan,) -> Result<Option<Gallery>> {
        self.update_gallery_impl(id, gallery, plan).await
    }

    async fn delete_gallery(&self, id: i64) -> Result<bool> {
        self.delete_gallery_impl(id).await
    }

    async fn set_gallery_published(&self, id: i64, is_published: bool) -> Result<Option<Gallery>> {
        self.set_gallery_published_impl(id, is_published).await
    }

    async fn set_gallery_featured_image(&self, id: i64, image: Option<String>) -> Result<bool> {
        self.set_gallery_featured_image_impl(id, image).await
    }

    async fn reorder_galleries(&self, orders: &[GalleryOrder]) -> Result<u64> {
        self.reorder_galleries_impl(orders).await
    }

    async fn list_gallery_items(&self, gallery_id: i64) -> Result<Vec<GalleryItem>> {
        self.list_gallery_items_impl(gallery_id).await
    }

    async fn list_gallery_items_for(&self, gallery_ids: &[i64],) -> Result<HashMap<i64, Vec<GalleryItem>>> {
        self.list_gallery_items_for_impl(gallery_ids).await
    }

    async fn get_gallery_item(&self, gallery_id: i64, item_id: i64) -> Result<Option<GalleryItem>> {
        self.get_gallery_item_impl(gallery_id, item_id).await
    }



    async fn delete_gallery_item(&self, item_id: i64) -> Result<bool> {
        self.delete_gallery_item_impl(item_id).await
    }

    async fn set_gallery_item_featured(&self, item_id: i64, is_featured: bool) -> Result<bool> {
        self.set_gallery_item_featured_impl(item_id, is_featured).await
    }

    async fn clear_gallery_item_file(&self, item_id: i64) -> Result<bool> {
        self.clear_gallery_item_file_impl(item_id).await
    }

    async fn list_work_items(&self) -> Result<Vec<WorkItem>> {
        self.list_work_items_impl().await
    }

    async fn get_work_item(&self, id: i64) -> Result<Option<WorkItem>> {
        self.get_work_item_impl(id).await
    }

    async fn work_item_name_taken(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.work_item_name_taken_impl(name, exclude_id).await
    }

    async fn create_work_item(&self, name: &str, is_required: bool, created_by_role: &str,) -> Result<WorkItem> {
        self.create_work_item_impl(name, is_required, created_by_role).await
    }

    async fn update_work_item(&self, id: i64, name: &str, is_required: bool,) -> Result<Option<WorkItem>> {
        self.update_work_item_impl(id, name, is_required).await
    }

    async fn delete_work_item(&self, id: i64) -> Result<bool> {
        self.delete_work_item_impl(id).await
    }

    async fn list_teachers_with_subjects(&self) -> Result<Vec<(Staff, Vec<Subject>)>> {
        self.list_teachers_with_subjects_impl().await
    }

    async fn list_teacher_subject_works(&self) -> Result<Vec<TeacherSubjectWork>> {
        self.list_teacher_subject_works_impl().await
    }

    async fn list_works_for_staff(&self, staff_id: i64) -> Result<Vec<TeacherSubjectWork>> {
        self.list_works_for_staff_impl(staff_id).await
    }

    async fn list_works_for_item(&self, work_item_id: i64) -> Result<Vec<TeacherSubjectWork>> {
        self.list_works_for_item_impl(work_item_id).await
    }

    async fn get_teacher_subject_work(&self, id: i64) -> Result<Option<TeacherSubjectWork>> {
        self.get_teacher_subject_work_impl(id).await
    }

    async fn find_teacher_subject_work(&self, staff_id: i64, subject_id: i64, work_item_id: i64,) -> Result<Option<TeacherSubjectWork>> {
        self.find_teacher_subject_work_impl(staff_id, subject_id, work_item_id).await
    }

    async fn upsert_teacher_subject_work(&self, staff_id: i64, subject_id: i64, work_item_id: i64, folder_name: &str, gdrive_folder_id: &str,) -> Result<TeacherSubjectWork> {
        self.upsert_teacher_subject_work_impl(staff_id, subject_id, work_item_id, folder_name, gdrive_folder_id).await
    }

    async fn list_work_files(&self, work_ids: &[i64]) -> Result<Vec<TeacherWorkFile>> {
        self.list_work_files_impl(work_ids).await
    }

    async fn get_work_file(&self, id: i64) -> Result<Option<TeacherWorkFile>> {
        self.get_work_file_impl(id).await
    }

    async fn create_work_file(&self, file: NewWorkFile) -> Result<TeacherWorkFile> {
        self.create_work_file_impl(file).await
    }

    async fn delete_work_file(&self, id: i64) -> Result<bool> {
        self.delete_work_file_impl(id).await
    }

    async fn track_work_file_access(&self, id: i64, download: bool,) -> Result<Option<TeacherWorkFile>> {
        self.track_work_file_access_impl(id, download).await
    }

    async fn get_active_drive_token(&self, service_name: &str) -> Result<Option<GoogleDriveToken>> {
        self.get_active_drive_token_impl(service_name).await
    }

    async fn save_drive_token(&self, service_name: &str, token: NewDriveToken,) -> Result<GoogleDriveToken> {
        self.save_drive_token_impl(service_name, token).await
    }

    async fn deactivate_drive_token(&self, id: i64) -> Result<bool> {
        self.deactivate_drive_token_impl(id).await
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<UserActivity> {
        self.create_activity_impl(activity).await
    }

    async fn list_activities_with_users(&self, activity_types: &[&str], limit: Option<u64>,) -> Result<Vec<(UserActivity, User)>> {
        self.list_activities_with_users_impl(activity_types, limit).await
    }

    async fn delete_activities(&self, ids: &[i64], activity_types: &[&str]) -> Result<u64> {
        self.delete_activities_impl(ids, activity_types).await
    }

    async fn dashboard_metrics(&self, login_since: i64) -> Result<DashboardMetrics> {
        self.dashboard_metrics_impl(login_since).await
    }
}

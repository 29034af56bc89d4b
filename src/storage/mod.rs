use std::collections::HashMap;
use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListParams) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UserChanges) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 批量删除用户
    async fn delete_users(&self, ids: &[i64]) -> Result<u64>;
    // 统计给定ID中存在的用户数量
    async fn count_existing_users(&self, ids: &[i64]) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 教职工管理方法
    async fn list_staff_with_pagination(
        &self,
        query: StaffListParams,
        divisions: Vec<String>,
    ) -> Result<StaffListResponse>;
    // 全部教职工（按姓名排序）
    async fn list_all_staff(&self) -> Result<Vec<Staff>>;
    async fn get_staff_by_id(&self, id: i64) -> Result<Option<Staff>>;
    async fn get_staff_by_slug(&self, slug: &str) -> Result<Option<Staff>>;
    async fn get_staff_by_user_id(&self, user_id: i64) -> Result<Option<Staff>>;
    async fn list_staff_by_ids(&self, ids: &[i64]) -> Result<Vec<Staff>>;
    // 邮箱是否已被其他教职工使用
    async fn staff_email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn staff_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn create_staff(&self, staff: StaffRequest, slug: String) -> Result<Staff>;
    async fn update_staff(&self, id: i64, staff: StaffRequest, slug: String)
    -> Result<Option<Staff>>;
    async fn delete_staff(&self, id: i64) -> Result<bool>;
    async fn delete_staff_many(&self, ids: &[i64]) -> Result<u64>;
    // 教职工任教的科目
    async fn list_staff_subjects(&self, staff_id: i64) -> Result<Vec<Subject>>;
    // 同步教职工任教科目，移除的科目同时删除对应的教学文档目录记录
    async fn sync_staff_subjects(&self, staff_id: i64, subject_ids: &[i64]) -> Result<()>;
    async fn remove_staff_subject(&self, staff_id: i64, subject_id: i64) -> Result<bool>;
    // 学术部门任课教师（分页）及其科目
    async fn list_eligible_teachers(
        &self,
        search: Option<String>,
        page: u64,
        size: u64,
    ) -> Result<PaginatedResponse<TeacherAssignment>>;

    /// 职务履历
    async fn list_position_history(&self, staff_id: i64) -> Result<Vec<PositionHistory>>;
    async fn create_position_history(
        &self,
        history: PositionHistoryRequest,
    ) -> Result<PositionHistory>;
    async fn update_position_history(
        &self,
        id: i64,
        history: PositionHistoryRequest,
    ) -> Result<Option<PositionHistory>>;
    async fn delete_position_history(&self, id: i64) -> Result<bool>;
    async fn delete_position_histories(&self, ids: &[i64]) -> Result<u64>;

    /// 科目管理方法
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListParams,
    ) -> Result<SubjectListResponse>;
    async fn list_all_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn subject_code_taken(&self, code: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn create_subject(&self, subject: SubjectRequest) -> Result<Subject>;
    async fn update_subject(&self, id: i64, subject: SubjectRequest) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    async fn delete_subjects(&self, ids: &[i64]) -> Result<u64>;
    async fn list_subject_staff(&self, subject_id: i64) -> Result<Vec<Staff>>;
    async fn sync_subject_staff(&self, subject_id: i64, staff_ids: &[i64]) -> Result<()>;
    async fn remove_subject_staff(&self, subject_id: i64, staff_id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn list_students_with_pagination(
        &self,
        query: StudentListParams,
    ) -> Result<StudentListResponse>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn student_nisn_taken(&self, nisn: &str, exclude_id: Option<i64>) -> Result<bool>;
    // 创建学生并同步课外活动（同一事务）
    async fn create_student(
        &self,
        student: StudentRequest,
        homeroom_teacher_id: Option<i64>,
    ) -> Result<Student>;
    async fn update_student(
        &self,
        id: i64,
        student: StudentRequest,
        homeroom_teacher_id: Option<i64>,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn delete_students(&self, ids: &[i64]) -> Result<u64>;
    async fn count_existing_students(&self, ids: &[i64]) -> Result<u64>;
    async fn list_student_extracurriculars(&self, student_id: i64) -> Result<Vec<Extracurricular>>;
    async fn list_students_in_class(&self, class_name: &str) -> Result<Vec<Student>>;
    // 各班级学生人数
    async fn count_students_by_class(&self) -> Result<HashMap<String, i64>>;

    /// 班级管理方法
    async fn list_classes_with_pagination(
        &self,
        query: ClassQueryParams,
    ) -> Result<ClassListResponse>;
    async fn list_classes(&self, grade_level: Option<String>) -> Result<Vec<SchoolClass>>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<SchoolClass>>;
    async fn get_class_by_name(&self, name: &str) -> Result<Option<SchoolClass>>;
    async fn create_class(&self, class: ClassRequest) -> Result<SchoolClass>;
    // 更新班级，改名时同步学生与班主任的班级名称
    async fn update_class(&self, id: i64, class: ClassRequest) -> Result<Option<SchoolClass>>;
    // 删除班级并清除班主任分配
    async fn delete_class(&self, id: i64) -> Result<bool>;
    async fn class_statistics(&self) -> Result<ClassStatistics>;

    async fn get_homeroom_teacher_for_class(&self, class_name: &str) -> Result<Option<Staff>>;
    // 分配班主任并更新该班学生的班主任
    async fn assign_homeroom(&self, staff_id: i64, class_name: &str) -> Result<u64>;
    // 取消班主任并清除该班学生的班主任
    async fn remove_homeroom(&self, staff_id: i64, class_name: &str) -> Result<u64>;
    // 将班级所有学生的班主任设置为指定教职工
    async fn set_class_homeroom_teacher(&self, class_name: &str, staff_id: i64) -> Result<u64>;

    /// 课外活动管理方法
    async fn list_extracurriculars_with_pagination(
        &self,
        query: ExtracurricularListParams,
    ) -> Result<ExtracurricularListResponse>;
    async fn list_all_extracurriculars(&self) -> Result<Vec<ExtracurricularWithCount>>;
    async fn get_extracurricular_by_id(&self, id: i64) -> Result<Option<Extracurricular>>;
    async fn extracurricular_name_taken(&self, name: &str, exclude_id: Option<i64>)
    -> Result<bool>;
    async fn create_extracurricular(
        &self,
        extracurricular: ExtracurricularRequest,
    ) -> Result<Extracurricular>;
    async fn update_extracurricular(
        &self,
        id: i64,
        extracurricular: ExtracurricularRequest,
    ) -> Result<Option<Extracurricular>>;
    async fn delete_extracurricular(&self, id: i64) -> Result<bool>;
    async fn delete_extracurriculars(&self, ids: &[i64]) -> Result<u64>;
    async fn list_extracurricular_students(&self, id: i64) -> Result<Vec<Student>>;
    // 添加成员，已存在的成员忽略，返回新增数量
    async fn attach_extracurricular_students(&self, id: i64, student_ids: &[i64]) -> Result<u64>;
    async fn detach_extracurricular_student(&self, id: i64, student_id: i64) -> Result<bool>;

    /// 文章管理方法
    async fn list_posts_with_pagination(&self, query: PostListParams) -> Result<PostListResponse>;
    // 已发布文章（公开页面）
    async fn list_published_posts(
        &self,
        category: Option<PostCategory>,
        search: Option<String>,
        page: u64,
        size: u64,
    ) -> Result<PostListResponse>;
    async fn latest_published_posts(
        &self,
        category: Option<PostCategory>,
        limit: u64,
    ) -> Result<Vec<PostWithAuthor>>;
    async fn related_published_posts(
        &self,
        category: PostCategory,
        exclude_id: i64,
        limit: u64,
    ) -> Result<Vec<PostWithAuthor>>;
    async fn get_post_by_id(&self, id: i64) -> Result<Option<PostWithAuthor>>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostWithAuthor>>;
    async fn post_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn create_post(&self, user_id: Option<i64>, post: PostChanges) -> Result<Post>;
    async fn update_post(&self, id: i64, post: PostChanges) -> Result<Option<Post>>;
    async fn delete_post(&self, id: i64) -> Result<bool>;
    async fn set_post_published(&self, id: i64, is_published: bool) -> Result<Option<Post>>;

    /// 页面管理方法
    async fn list_pages_with_pagination(&self, query: PageListParams) -> Result<PageListResponse>;
    async fn list_all_pages(&self) -> Result<Vec<Page>>;
    async fn get_page_by_id(&self, id: i64) -> Result<Option<Page>>;
    async fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>>;
    async fn page_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn create_page(&self, page: PageRequest, image: Option<String>) -> Result<Page>;
    async fn update_page(
        &self,
        id: i64,
        page: PageRequest,
        image: Option<String>,
    ) -> Result<Option<Page>>;
    async fn delete_page(&self, id: i64) -> Result<bool>;

    /// 设施管理方法
    async fn list_facilities_with_pagination(
        &self,
        query: FacilityListParams,
    ) -> Result<FacilityListResponse>;
    async fn list_all_facilities(&self) -> Result<Vec<Facility>>;
    async fn get_facility_by_id(&self, id: i64) -> Result<Option<Facility>>;
    async fn create_facility(
        &self,
        facility: FacilityRequest,
        photo: Option<String>,
    ) -> Result<Facility>;
    async fn update_facility(
        &self,
        id: i64,
        facility: FacilityRequest,
        photo: Option<String>,
    ) -> Result<Option<Facility>>;
    async fn delete_facility(&self, id: i64) -> Result<bool>;

    /// 联系信息管理方法
    async fn list_contacts_with_pagination(
        &self,
        query: ContactListParams,
    ) -> Result<ContactListResponse>;
    async fn latest_contact(&self) -> Result<Option<Contact>>;
    async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>>;
    async fn create_contact(&self, contact: ContactRequest) -> Result<Contact>;
    async fn update_contact(&self, id: i64, contact: ContactRequest) -> Result<Option<Contact>>;
    async fn delete_contact(&self, id: i64) -> Result<bool>;

    /// 相册管理方法
    async fn list_galleries_with_pagination(
        &self,
        query: GalleryListParams,
    ) -> Result<GalleryListResponse>;
    // 已发布相册（公开页面）
    async fn list_published_galleries(
        &self,
        search: Option<String>,
        page: u64,
        size: u64,
    ) -> Result<GalleryListResponse>;
    async fn latest_published_galleries(
        &self,
        exclude_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<Gallery>>;
    async fn get_gallery_by_id(&self, id: i64) -> Result<Option<Gallery>>;
    async fn get_gallery_by_slug(&self, slug: &str) -> Result<Option<Gallery>>;
    async fn gallery_slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn max_gallery_sort_order(&self) -> Result<Option<i32>>;
    // 创建相册及其条目（同一事务）
    async fn create_gallery(
        &self,
        gallery: GalleryChanges,
        items: Vec<GalleryItemData>,
    ) -> Result<Gallery>;
    // 更新相册并应用条目变更计划（同一事务）
    async fn update_gallery(
        &self,
        id: i64,
        gallery: GalleryChanges,
        plan: GalleryItemPlan,
    ) -> Result<Option<Gallery>>;
    async fn delete_gallery(&self, id: i64) -> Result<bool>;
    async fn set_gallery_published(&self, id: i64, is_published: bool) -> Result<Option<Gallery>>;
    async fn set_gallery_featured_image(&self, id: i64, image: Option<String>) -> Result<bool>;
    async fn reorder_galleries(&self, orders: &[GalleryOrder]) -> Result<u64>;
    async fn list_gallery_items(&self, gallery_id: i64) -> Result<Vec<GalleryItem>>;
    // 多个相册的条目，按相册分组
    async fn list_gallery_items_for(
        &self,
        gallery_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<GalleryItem>>>;
    async fn get_gallery_item(&self, gallery_id: i64, item_id: i64)
    -> Result<Option<GalleryItem>>;
    async fn delete_gallery_item(&self, item_id: i64) -> Result<bool>;
    async fn set_gallery_item_featured(&self, item_id: i64, is_featured: bool) -> Result<bool>;
    // 清空条目的文件与类型
    async fn clear_gallery_item_file(&self, item_id: i64) -> Result<bool>;

    /// 教学文档管理方法
    async fn list_work_items(&self) -> Result<Vec<WorkItem>>;
    async fn get_work_item(&self, id: i64) -> Result<Option<WorkItem>>;
    async fn work_item_name_taken(&self, name: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn create_work_item(
        &self,
        name: &str,
        is_required: bool,
        created_by_role: &str,
    ) -> Result<WorkItem>;
    async fn update_work_item(
        &self,
        id: i64,
        name: &str,
        is_required: bool,
    ) -> Result<Option<WorkItem>>;
    async fn delete_work_item(&self, id: i64) -> Result<bool>;
    // 拥有任教科目的教师及其科目
    async fn list_teachers_with_subjects(&self) -> Result<Vec<(Staff, Vec<Subject>)>>;
    async fn list_teacher_subject_works(&self) -> Result<Vec<TeacherSubjectWork>>;
    async fn list_works_for_staff(&self, staff_id: i64) -> Result<Vec<TeacherSubjectWork>>;
    async fn list_works_for_item(&self, work_item_id: i64) -> Result<Vec<TeacherSubjectWork>>;
    async fn get_teacher_subject_work(&self, id: i64) -> Result<Option<TeacherSubjectWork>>;
    async fn find_teacher_subject_work(
        &self,
        staff_id: i64,
        subject_id: i64,
        work_item_id: i64,
    ) -> Result<Option<TeacherSubjectWork>>;
    async fn upsert_teacher_subject_work(
        &self,
        staff_id: i64,
        subject_id: i64,
        work_item_id: i64,
        folder_name: &str,
        gdrive_folder_id: &str,
    ) -> Result<TeacherSubjectWork>;
    async fn list_work_files(&self, work_ids: &[i64]) -> Result<Vec<TeacherWorkFile>>;
    async fn get_work_file(&self, id: i64) -> Result<Option<TeacherWorkFile>>;
    async fn create_work_file(&self, file: NewWorkFile) -> Result<TeacherWorkFile>;
    async fn delete_work_file(&self, id: i64) -> Result<bool>;
    // 记录访问：views+1，下载时 downloads+1
    async fn track_work_file_access(
        &self,
        id: i64,
        download: bool,
    ) -> Result<Option<TeacherWorkFile>>;

    /// Google Drive 令牌
    async fn get_active_drive_token(&self, service_name: &str) -> Result<Option<GoogleDriveToken>>;
    // 创建或更新当前有效令牌
    async fn save_drive_token(
        &self,
        service_name: &str,
        token: NewDriveToken,
    ) -> Result<GoogleDriveToken>;
    async fn deactivate_drive_token(&self, id: i64) -> Result<bool>;

    /// 用户活动
    async fn create_activity(&self, activity: NewActivity) -> Result<UserActivity>;
    // 指定类型的活动及其用户，最新在前
    async fn list_activities_with_users(
        &self,
        activity_types: &[&str],
        limit: Option<u64>,
    ) -> Result<Vec<(UserActivity, User)>>;
    async fn delete_activities(&self, ids: &[i64], activity_types: &[&str]) -> Result<u64>;

    /// 仪表盘统计
    async fn dashboard_metrics(&self, login_since: i64) -> Result<DashboardMetrics>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

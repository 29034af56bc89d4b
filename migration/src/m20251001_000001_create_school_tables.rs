use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教职工表
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Staff::UserId).big_integer().null())
                    .col(ColumnDef::new(Staff::Name).string().not_null())
                    .col(
                        ColumnDef::new(Staff::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::Position).string().not_null())
                    .col(ColumnDef::new(Staff::Division).string().not_null())
                    .col(ColumnDef::new(Staff::HomeroomClass).string().null())
                    .col(ColumnDef::new(Staff::Photo).string().null())
                    .col(ColumnDef::new(Staff::Email).string().null())
                    .col(ColumnDef::new(Staff::Phone).string().null())
                    .col(ColumnDef::new(Staff::Bio).text().null())
                    .col(ColumnDef::new(Staff::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Staff::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Staff::Table, Staff::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 职务履历表
        manager
            .create_table(
                Table::create()
                    .table(PositionHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PositionHistories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PositionHistories::StaffId).big_integer().not_null())
                    .col(ColumnDef::new(PositionHistories::Title).string().not_null())
                    .col(ColumnDef::new(PositionHistories::StartYear).integer().not_null())
                    .col(ColumnDef::new(PositionHistories::EndYear).integer().null())
                    .col(ColumnDef::new(PositionHistories::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(PositionHistories::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(PositionHistories::Table, PositionHistories::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 班级表
        manager
            .create_table(
                Table::create()
                    .table(SchoolClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolClasses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolClasses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SchoolClasses::GradeLevel).string().not_null())
                    .col(ColumnDef::new(SchoolClasses::ClassSection).string().not_null())
                    .col(ColumnDef::new(SchoolClasses::Description).string().null())
                    .col(ColumnDef::new(SchoolClasses::Capacity).integer().not_null())
                    .col(ColumnDef::new(SchoolClasses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(SchoolClasses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::HomeroomTeacherId).big_integer().null())
                    .col(
                        ColumnDef::new(Students::Nisn)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().not_null())
                    .col(ColumnDef::new(Students::BirthDate).string().not_null())
                    .col(ColumnDef::new(Students::BirthPlace).string().null())
                    .col(ColumnDef::new(Students::Religion).string().null())
                    .col(ColumnDef::new(Students::Address).text().null())
                    .col(ColumnDef::new(Students::ParentName).string().null())
                    .col(ColumnDef::new(Students::ParentPhone).string().null())
                    .col(ColumnDef::new(Students::Class).string().not_null())
                    .col(ColumnDef::new(Students::EntryYear).integer().not_null())
                    .col(ColumnDef::new(Students::GraduationYear).integer().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::Photo).string().null())
                    .col(ColumnDef::new(Students::Notes).text().null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::HomeroomTeacherId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::Code).string().null().unique_key())
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师-科目关联表
        manager
            .create_table(
                Table::create()
                    .table(StaffSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffSubjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffSubjects::StaffId).big_integer().not_null())
                    .col(ColumnDef::new(StaffSubjects::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(StaffSubjects::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffSubjects::Table, StaffSubjects::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffSubjects::Table, StaffSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课外活动表
        manager
            .create_table(
                Table::create()
                    .table(Extracurriculars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Extracurriculars::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Extracurriculars::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Extracurriculars::Description).text().null())
                    .col(ColumnDef::new(Extracurriculars::Photo).string().null())
                    .col(ColumnDef::new(Extracurriculars::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Extracurriculars::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课外活动-学生关联表
        manager
            .create_table(
                Table::create()
                    .table(ExtracurricularStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExtracurricularStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExtracurricularStudents::ExtracurricularId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtracurricularStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtracurricularStudents::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExtracurricularStudents::Table, ExtracurricularStudents::ExtracurricularId)
                            .to(Extracurriculars::Table, Extracurriculars::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExtracurricularStudents::Table, ExtracurricularStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 相册表
        manager
            .create_table(
                Table::create()
                    .table(Galleries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Galleries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Galleries::Title).string().not_null())
                    .col(
                        ColumnDef::new(Galleries::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Galleries::Description).text().null())
                    .col(ColumnDef::new(Galleries::FeaturedImage).string().null())
                    .col(ColumnDef::new(Galleries::IsPublished).boolean().not_null())
                    .col(ColumnDef::new(Galleries::SortOrder).integer().not_null())
                    .col(ColumnDef::new(Galleries::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Galleries::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 相册条目表
        manager
            .create_table(
                Table::create()
                    .table(GalleryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GalleryItems::GalleryId).big_integer().not_null())
                    .col(ColumnDef::new(GalleryItems::Title).string().null())
                    .col(ColumnDef::new(GalleryItems::Caption).text().null())
                    .col(ColumnDef::new(GalleryItems::MimeType).string().null())
                    .col(ColumnDef::new(GalleryItems::FilePath).string().null())
                    .col(ColumnDef::new(GalleryItems::Metadata).text().null())
                    .col(ColumnDef::new(GalleryItems::SortOrder).integer().not_null())
                    .col(ColumnDef::new(GalleryItems::IsFeatured).boolean().not_null())
                    .col(ColumnDef::new(GalleryItems::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(GalleryItems::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(GalleryItems::Table, GalleryItems::GalleryId)
                            .to(Galleries::Table, Galleries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 文章表
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Posts::UserId).big_integer().null())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(
                        ColumnDef::new(Posts::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Posts::Excerpt).text().null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::Category).string().not_null())
                    .col(ColumnDef::new(Posts::Image).string().null())
                    .col(ColumnDef::new(Posts::IsPublished).boolean().not_null())
                    .col(ColumnDef::new(Posts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Posts::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 页面表
        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Pages::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Pages::Title).string().not_null())
                    .col(ColumnDef::new(Pages::Content).text().not_null())
                    .col(ColumnDef::new(Pages::Image).string().null())
                    .col(ColumnDef::new(Pages::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Pages::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 设施表
        manager
            .create_table(
                Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Facilities::Name).string().not_null())
                    .col(ColumnDef::new(Facilities::Description).text().not_null())
                    .col(ColumnDef::new(Facilities::Photo).string().null())
                    .col(ColumnDef::new(Facilities::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Facilities::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 联系信息表
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::Name).string().not_null())
                    .col(ColumnDef::new(Contacts::Email).string().not_null())
                    .col(ColumnDef::new(Contacts::Phone).string().null())
                    .col(ColumnDef::new(Contacts::Address).string().null())
                    .col(ColumnDef::new(Contacts::Message).text().not_null())
                    .col(ColumnDef::new(Contacts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Contacts::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教学文档项目表
        manager
            .create_table(
                Table::create()
                    .table(WorkItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkItems::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WorkItems::IsRequired).boolean().not_null())
                    .col(ColumnDef::new(WorkItems::CreatedByRole).string().not_null())
                    .col(ColumnDef::new(WorkItems::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(WorkItems::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师科目文档目录表
        manager
            .create_table(
                Table::create()
                    .table(TeacherSubjectWorks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherSubjectWorks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeacherSubjectWorks::StaffId).big_integer().not_null())
                    .col(ColumnDef::new(TeacherSubjectWorks::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(TeacherSubjectWorks::WorkItemId).big_integer().not_null())
                    .col(ColumnDef::new(TeacherSubjectWorks::FolderName).string().not_null())
                    .col(ColumnDef::new(TeacherSubjectWorks::GdriveFolderId).string().not_null())
                    .col(ColumnDef::new(TeacherSubjectWorks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(TeacherSubjectWorks::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjectWorks::Table, TeacherSubjectWorks::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjectWorks::Table, TeacherSubjectWorks::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjectWorks::Table, TeacherSubjectWorks::WorkItemId)
                            .to(WorkItems::Table, WorkItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 教师文档文件表
        manager
            .create_table(
                Table::create()
                    .table(TeacherWorkFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherWorkFiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherWorkFiles::TeacherSubjectWorkId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherWorkFiles::FileName).string().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::FileUrl).string().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::FilePath).string().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::MimeType).string().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::UploadedAt).big_integer().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::LastAccessed).big_integer().null())
                    .col(ColumnDef::new(TeacherWorkFiles::Views).integer().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::Downloads).integer().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(TeacherWorkFiles::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherWorkFiles::Table, TeacherWorkFiles::TeacherSubjectWorkId)
                            .to(TeacherSubjectWorks::Table, TeacherSubjectWorks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Google Drive 令牌表
        manager
            .create_table(
                Table::create()
                    .table(GoogleDriveTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GoogleDriveTokens::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GoogleDriveTokens::ServiceName).string().not_null())
                    .col(ColumnDef::new(GoogleDriveTokens::AccessToken).text().not_null())
                    .col(ColumnDef::new(GoogleDriveTokens::RefreshToken).text().null())
                    .col(ColumnDef::new(GoogleDriveTokens::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(GoogleDriveTokens::TokenData).text().null())
                    .col(ColumnDef::new(GoogleDriveTokens::IsActive).boolean().not_null())
                    .col(ColumnDef::new(GoogleDriveTokens::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(GoogleDriveTokens::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 用户活动表
        manager
            .create_table(
                Table::create()
                    .table(UserActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserActivities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserActivities::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserActivities::ActivityType).string().not_null())
                    .col(ColumnDef::new(UserActivities::Description).string().not_null())
                    .col(ColumnDef::new(UserActivities::IpAddress).string().null())
                    .col(ColumnDef::new(UserActivities::UserAgent).text().null())
                    .col(ColumnDef::new(UserActivities::Metadata).text().null())
                    .col(ColumnDef::new(UserActivities::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(UserActivities::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserActivities::Table, UserActivities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_staff_division")
                    .table(Staff::Table)
                    .col(Staff::Division)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class")
                    .table(Students::Table)
                    .col(Students::Class)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_status")
                    .table(Students::Table)
                    .col(Students::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_staff_subjects_unique")
                    .table(StaffSubjects::Table)
                    .col(StaffSubjects::StaffId)
                    .col(StaffSubjects::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_extracurricular_students_unique")
                    .table(ExtracurricularStudents::Table)
                    .col(ExtracurricularStudents::ExtracurricularId)
                    .col(ExtracurricularStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gallery_items_gallery")
                    .table(GalleryItems::Table)
                    .col(GalleryItems::GalleryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_posts_category_published")
                    .table(Posts::Table)
                    .col(Posts::Category)
                    .col(Posts::IsPublished)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teacher_subject_works_unique")
                    .table(TeacherSubjectWorks::Table)
                    .col(TeacherSubjectWorks::StaffId)
                    .col(TeacherSubjectWorks::SubjectId)
                    .col(TeacherSubjectWorks::WorkItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teacher_work_files_work")
                    .table(TeacherWorkFiles::Table)
                    .col(TeacherWorkFiles::TeacherSubjectWorkId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_activities_type")
                    .table(UserActivities::Table)
                    .col(UserActivities::ActivityType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(UserActivities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GoogleDriveTokens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherWorkFiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherSubjectWorks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Facilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalleryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Galleries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExtracurricularStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Extracurriculars::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PositionHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Status,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Staff {
    #[sea_orm(iden = "staff")]
    Table,
    Id,
    UserId,
    Name,
    Slug,
    Position,
    Division,
    HomeroomClass,
    Photo,
    Email,
    Phone,
    Bio,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PositionHistories {
    #[sea_orm(iden = "position_histories")]
    Table,
    Id,
    StaffId,
    Title,
    StartYear,
    EndYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SchoolClasses {
    #[sea_orm(iden = "school_classes")]
    Table,
    Id,
    Name,
    GradeLevel,
    ClassSection,
    Description,
    Capacity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    HomeroomTeacherId,
    Nisn,
    Name,
    Gender,
    BirthDate,
    BirthPlace,
    Religion,
    Address,
    ParentName,
    ParentPhone,
    Class,
    EntryYear,
    GraduationYear,
    Status,
    Photo,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StaffSubjects {
    #[sea_orm(iden = "staff_subjects")]
    Table,
    Id,
    StaffId,
    SubjectId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Extracurriculars {
    #[sea_orm(iden = "extracurriculars")]
    Table,
    Id,
    Name,
    Description,
    Photo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExtracurricularStudents {
    #[sea_orm(iden = "extracurricular_students")]
    Table,
    Id,
    ExtracurricularId,
    StudentId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Galleries {
    #[sea_orm(iden = "galleries")]
    Table,
    Id,
    Title,
    Slug,
    Description,
    FeaturedImage,
    IsPublished,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GalleryItems {
    #[sea_orm(iden = "gallery_items")]
    Table,
    Id,
    GalleryId,
    Title,
    Caption,
    MimeType,
    FilePath,
    Metadata,
    SortOrder,
    IsFeatured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    #[sea_orm(iden = "posts")]
    Table,
    Id,
    UserId,
    Title,
    Slug,
    Excerpt,
    Content,
    Category,
    Image,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pages {
    #[sea_orm(iden = "pages")]
    Table,
    Id,
    Slug,
    Title,
    Content,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Facilities {
    #[sea_orm(iden = "facilities")]
    Table,
    Id,
    Name,
    Description,
    Photo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Contacts {
    #[sea_orm(iden = "contacts")]
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    Message,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WorkItems {
    #[sea_orm(iden = "work_items")]
    Table,
    Id,
    Name,
    IsRequired,
    CreatedByRole,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherSubjectWorks {
    #[sea_orm(iden = "teacher_subject_works")]
    Table,
    Id,
    StaffId,
    SubjectId,
    WorkItemId,
    FolderName,
    GdriveFolderId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherWorkFiles {
    #[sea_orm(iden = "teacher_work_files")]
    Table,
    Id,
    TeacherSubjectWorkId,
    FileName,
    FileUrl,
    FilePath,
    FileSize,
    MimeType,
    UploadedAt,
    LastAccessed,
    Views,
    Downloads,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GoogleDriveTokens {
    #[sea_orm(iden = "google_drive_tokens")]
    Table,
    Id,
    ServiceName,
    AccessToken,
    RefreshToken,
    ExpiresAt,
    TokenData,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserActivities {
    #[sea_orm(iden = "user_activities")]
    Table,
    Id,
    UserId,
    ActivityType,
    Description,
    IpAddress,
    UserAgent,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

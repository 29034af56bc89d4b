//! 预导入模块，方便使用

pub use super::contacts::{
    ActiveModel as ContactActiveModel, Entity as Contacts, Model as ContactModel,
};
pub use super::extracurricular_students::{
    ActiveModel as ExtracurricularStudentActiveModel, Entity as ExtracurricularStudents,
    Model as ExtracurricularStudentModel,
};
pub use super::extracurriculars::{
    ActiveModel as ExtracurricularActiveModel, Entity as Extracurriculars,
    Model as ExtracurricularModel,
};
pub use super::facilities::{
    ActiveModel as FacilityActiveModel, Entity as Facilities, Model as FacilityModel,
};
pub use super::galleries::{
    ActiveModel as GalleryActiveModel, Entity as Galleries, Model as GalleryModel,
};
pub use super::gallery_items::{
    ActiveModel as GalleryItemActiveModel, Entity as GalleryItems, Model as GalleryItemModel,
};
pub use super::google_drive_tokens::{
    ActiveModel as GoogleDriveTokenActiveModel, Entity as GoogleDriveTokens,
    Model as GoogleDriveTokenModel,
};
pub use super::pages::{ActiveModel as PageActiveModel, Entity as Pages, Model as PageModel};
pub use super::position_histories::{
    ActiveModel as PositionHistoryActiveModel, Entity as PositionHistories,
    Model as PositionHistoryModel,
};
pub use super::posts::{ActiveModel as PostActiveModel, Entity as Posts, Model as PostModel};
pub use super::school_classes::{
    ActiveModel as SchoolClassActiveModel, Entity as SchoolClasses, Model as SchoolClassModel,
};
pub use super::staff::{ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel};
pub use super::staff_subjects::{
    ActiveModel as StaffSubjectActiveModel, Entity as StaffSubjects, Model as StaffSubjectModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_subject_works::{
    ActiveModel as TeacherSubjectWorkActiveModel, Entity as TeacherSubjectWorks,
    Model as TeacherSubjectWorkModel,
};
pub use super::teacher_work_files::{
    ActiveModel as TeacherWorkFileActiveModel, Entity as TeacherWorkFiles,
    Model as TeacherWorkFileModel,
};
pub use super::user_activities::{
    ActiveModel as UserActivityActiveModel, Entity as UserActivities, Model as UserActivityModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::work_items::{
    ActiveModel as WorkItemActiveModel, Entity as WorkItems, Model as WorkItemModel,
};

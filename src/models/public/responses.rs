use crate::models::contacts::entities::Contact;
use crate::models::extracurriculars::entities::Extracurricular;
use crate::models::facilities::entities::Facility;
use crate::models::galleries::entities::Gallery;
use crate::models::galleries::responses::GalleryItemView;
use crate::models::pages::entities::Page;
use crate::models::posts::responses::PostWithAuthor;
use crate::models::staff::entities::{PositionHistory, Staff};
use crate::models::subjects::entities::Subject;
use crate::models::work_items::entities::TeacherWorkFile;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

// 带条目的公开相册
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PublicGallery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub gallery: Gallery,
    pub items: Vec<GalleryItemView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct HomeResponse {
    pub featured_posts: Vec<PostWithAuthor>,
    pub latest_news: Vec<PostWithAuthor>,
    pub galleries: Vec<PublicGallery>,
    pub extracurriculars: Vec<Extracurricular>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct NewsDetailResponse {
    pub post: PostWithAuthor,
    pub related: Vec<PostWithAuthor>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct GalleryListPublicResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<PublicGallery>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct GalleryDetailPublicResponse {
    pub gallery: PublicGallery,
    pub others: Vec<Gallery>,
}

// 教师公开资料中的文件分组
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct TeacherFileGroups {
    pub prota: Vec<TeacherWorkFile>,
    pub prosem: Vec<TeacherWorkFile>,
    pub module: Vec<TeacherWorkFile>,
    pub attendance: Vec<TeacherWorkFile>,
    pub agenda: Vec<TeacherWorkFile>,
    pub other: Vec<TeacherWorkFile>,
}

impl TeacherFileGroups {
    /// 按文档类型名称归类
    pub fn push(&mut self, work_item_name: &str, file: TeacherWorkFile) {
        let name = work_item_name.to_lowercase();
        let bucket = if name.contains("prota") {
            &mut self.prota
        } else if name.contains("prosem") {
            &mut self.prosem
        } else if name.contains("modul") {
            &mut self.module
        } else if name.contains("absen") || name.contains("attendance") || name.contains("daftar hadir") {
            &mut self.attendance
        } else if name.contains("agenda") || name.contains("jurnal") {
            &mut self.agenda
        } else {
            &mut self.other
        };
        bucket.push(file);
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct TeacherProfile {
    #[serde(flatten)]
    #[ts(flatten)]
    pub staff: Staff,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct TeacherDetailResponse {
    pub teacher: TeacherProfile,
    pub position_history: Vec<PositionHistory>,
    pub files: TeacherFileGroups,
    pub recent_files: Vec<TeacherWorkFile>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PrincipalResponse {
    pub principal: Option<Staff>,
    pub position_history: Vec<PositionHistory>,
}

// 按部门分组的教职工名录
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct StaffDirectoryResponse {
    pub divisions: BTreeMap<String, Vec<Staff>>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct StaffDetailResponse {
    pub staff: Staff,
    pub position_history: Vec<PositionHistory>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct PagesResponse {
    pub pages: Vec<Page>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct FacilitiesResponse {
    pub facilities: Vec<Facility>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/public.ts")]
pub struct ContactResponse {
    pub contact: Option<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> TeacherWorkFile {
        let now = chrono::Utc::now();
        TeacherWorkFile {
            id: 1,
            teacher_subject_work_id: 1,
            file_name: name.into(),
            file_url: String::new(),
            file_path: String::new(),
            file_size: 0,
            mime_type: "application/pdf".into(),
            uploaded_at: now,
            last_accessed: None,
            views: 0,
            downloads: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_file_grouping() {
        let mut groups = TeacherFileGroups::default();
        groups.push("Prota", file("a.pdf"));
        groups.push("Modul Ajar", file("b.pdf"));
        groups.push("Daftar Hadir", file("c.pdf"));
        groups.push("Kisi-kisi", file("d.pdf"));
        assert_eq!(groups.prota.len(), 1);
        assert_eq!(groups.module.len(), 1);
        assert_eq!(groups.attendance.len(), 1);
        assert_eq!(groups.other.len(), 1);
    }
}

use std::collections::{BTreeMap, HashMap};

use crate::errors::Result;
use crate::models::public::responses::{
    PrincipalResponse, StaffDetailResponse, StaffDirectoryResponse, TeacherDetailResponse,
    TeacherFileGroups, TeacherProfile,
};
use crate::models::staff::entities::{Staff, is_academic_teacher, is_principal};
use crate::services::found;
use crate::storage::Storage;

const RECENT_FILES: usize = 5;

// 教职工名录中不展示的部门与职务
const EXCLUDED_DIVISIONS: [&str; 3] = ["akademik", "kepala sekolah", "administrasi sekolah"];
const EXCLUDED_POSITIONS: [&str; 5] = [
    "guru",
    "teacher",
    "kepala sekolah",
    "principal",
    "super administrator",
];

fn in_directory(staff: &Staff) -> bool {
    let division = staff.division.trim().to_lowercase();
    let position = staff.position.trim().to_lowercase();
    !EXCLUDED_DIVISIONS.contains(&division.as_str())
        && !EXCLUDED_POSITIONS.contains(&position.as_str())
}

pub(crate) async fn teachers(storage: &dyn Storage) -> Result<Vec<TeacherProfile>> {
    let staff = storage.list_all_staff().await?;
    let mut profiles = Vec::new();
    for teacher in staff.into_iter().filter(Staff::is_academic_teacher) {
        let subjects = storage.list_staff_subjects(teacher.id).await?;
        profiles.push(TeacherProfile {
            staff: teacher,
            subjects,
        });
    }
    Ok(profiles)
}

pub(crate) async fn teacher_detail(storage: &dyn Storage, slug: &str) -> Result<TeacherDetailResponse> {
    let teacher = found(
        storage
            .get_staff_by_slug(slug)
            .await?
            .filter(|s| is_academic_teacher(&s.position, &s.division)),
        "Teacher not found",
    )?;

    let works = storage.list_works_for_staff(teacher.id).await?;
    let item_names: HashMap<i64, String> = storage
        .list_work_items()
        .await?
        .into_iter()
        .map(|item| (item.id, item.name))
        .collect();
    let work_items: HashMap<i64, i64> = works.iter().map(|w| (w.id, w.work_item_id)).collect();
    let work_ids: Vec<i64> = works.iter().map(|w| w.id).collect();

    // 文件按上传时间倒序
    let uploaded = storage.list_work_files(&work_ids).await?;
    let recent_files = uploaded.iter().take(RECENT_FILES).cloned().collect();
    let mut files = TeacherFileGroups::default();
    for file in uploaded {
        let name = work_items
            .get(&file.teacher_subject_work_id)
            .and_then(|item_id| item_names.get(item_id))
            .map(String::as_str)
            .unwrap_or_default();
        files.push(name, file);
    }

    let subjects = storage.list_staff_subjects(teacher.id).await?;
    let position_history = storage.list_position_history(teacher.id).await?;
    Ok(TeacherDetailResponse {
        teacher: TeacherProfile {
            staff: teacher,
            subjects,
        },
        position_history,
        files,
        recent_files,
    })
}

pub(crate) async fn principal(storage: &dyn Storage) -> Result<PrincipalResponse> {
    let principal = storage
        .list_all_staff()
        .await?
        .into_iter()
        .find(|s| is_principal(&s.position));
    let position_history = match &principal {
        Some(staff) => storage.list_position_history(staff.id).await?,
        None => Vec::new(),
    };
    Ok(PrincipalResponse {
        principal,
        position_history,
    })
}

pub(crate) async fn staff_directory(storage: &dyn Storage) -> Result<StaffDirectoryResponse> {
    let mut divisions: BTreeMap<String, Vec<Staff>> = BTreeMap::new();
    // list_all_staff 已按姓名排序
    for staff in storage.list_all_staff().await?.into_iter().filter(in_directory) {
        divisions.entry(staff.division.clone()).or_default().push(staff);
    }
    Ok(StaffDirectoryResponse { divisions })
}

pub(crate) async fn staff_detail(storage: &dyn Storage, slug: &str) -> Result<StaffDetailResponse> {
    let staff = found(storage.get_staff_by_slug(slug).await?, "Staff not found")?;
    let position_history = storage.list_position_history(staff.id).await?;
    Ok(StaffDetailResponse {
        staff,
        position_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::staff::tests::create_staff;

    #[tokio::test]
    async fn test_directory_excludes_teaching_and_leadership() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Budi Santoso", "Guru", "Akademik").await;
        create_staff(&storage, "Siti Aminah", "Kepala Sekolah", "Kepala Sekolah").await;
        create_staff(&storage, "Rina Wati", "Staf TU", "Tata Usaha").await;
        create_staff(&storage, "Agus Salim", "Bendahara", "Tata Usaha").await;
        create_staff(&storage, "Joko", "Petugas Kebersihan", "Pramubhakti").await;

        let directory = staff_directory(&storage).await.unwrap();
        let keys: Vec<&String> = directory.divisions.keys().collect();
        assert_eq!(keys, ["Pramubhakti", "Tata Usaha"]);
        let names: Vec<&str> = directory.divisions["Tata Usaha"]
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Agus Salim", "Rina Wati"]);

        let principal = principal(&storage).await.unwrap();
        assert_eq!(principal.principal.unwrap().name, "Siti Aminah");

        let teachers = teachers(&storage).await.unwrap();
        assert_eq!(teachers.len(), 1);
        assert!(teachers[0].subjects.is_empty());
    }

    #[tokio::test]
    async fn test_teacher_detail_requires_academic_teacher() {
        let storage = SeaOrmStorage::new_in_memory().await;
        create_staff(&storage, "Budi Santoso", "Guru", "Akademik").await;
        create_staff(&storage, "Rina Wati", "Staf TU", "Tata Usaha").await;

        let detail = teacher_detail(&storage, "budi-santoso").await.unwrap();
        assert!(detail.recent_files.is_empty());
        assert!(detail.position_history.is_empty());

        let err = teacher_detail(&storage, "rina-wati").await.unwrap_err();
        assert_eq!(err.code(), "E008");
        assert_eq!(staff_detail(&storage, "rina-wati").await.unwrap().staff.position, "Staf TU");
    }
}

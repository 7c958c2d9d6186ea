use anyhow::Result;
use tracing::info;

use crate::models::employer::EmployerProfile;
use crate::models::job::JobFields;
use crate::store::JobStore;

/// Creates one demo employer with two open positions when the store has no
/// employers yet. Goes through the normal store operations so all counters
/// stay consistent.
pub async fn seed_demo_data(store: &JobStore) -> Result<()> {
    if !store.snapshot().await.employers.is_empty() {
        info!("Seed skipped: employers already present.");
        return Ok(());
    }

    let employer = store
        .register_employer(EmployerProfile {
            company_name: "Công ty Công nghệ ABC".to_string(),
            email: "techcompany@email.com".to_string(),
            phone: "0912345678".to_string(),
            address: "123 Đường ABC, Quận 1, TP.HCM".to_string(),
            tax_code: "0123456789".to_string(),
            contact_person: "Nguyễn Văn A".to_string(),
            position: "Trưởng phòng Nhân sự".to_string(),
            industry: "technology".to_string(),
        })
        .await?;

    let jobs = [
        JobFields {
            title: "Lập trình viên Frontend".to_string(),
            industry: "technology".to_string(),
            location: "Hồ Chí Minh".to_string(),
            job_type: "fulltime".to_string(),
            experience: "junior".to_string(),
            salary_min: Some(15),
            salary_max: Some(25),
            work_arrangement: vec!["office".to_string()],
            description: "Phát triển giao diện người dùng cho các ứng dụng web.".to_string(),
            requirements: "Kinh nghiệm React, JavaScript, HTML/CSS.".to_string(),
            benefits: "Lương thưởng hấp dẫn, bảo hiểm, đào tạo.".to_string(),
            vacancies: Some(2),
            contact_info: "HR Department - 0912345678".to_string(),
            ..JobFields::default()
        },
        JobFields {
            title: "Nhân viên Kinh doanh".to_string(),
            industry: "sales".to_string(),
            location: "Hà Nội".to_string(),
            job_type: "fulltime".to_string(),
            experience: "fresher".to_string(),
            salary_min: Some(10),
            salary_max: Some(15),
            work_arrangement: vec!["office".to_string(), "hybrid".to_string()],
            description: "Tìm kiếm khách hàng và phát triển thị trường.".to_string(),
            requirements: "Kỹ năng giao tiếp tốt, có tinh thần học hỏi.".to_string(),
            benefits: "Lương cứng + hoa hồng, thưởng doanh số.".to_string(),
            vacancies: Some(3),
            contact_info: "Phòng Kinh doanh - 0987654321".to_string(),
            ..JobFields::default()
        },
    ];
    for fields in jobs {
        store.create_job(employer.id, fields).await?;
    }

    info!("Seed complete: 1 employer, 2 jobs.");
    Ok(())
}

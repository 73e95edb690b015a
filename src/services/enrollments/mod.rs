pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::entities::Principal;
use crate::models::enrollments::requests::UpdateEnrollmentGrade;
use crate::registrar::RegistrarNotifier;
use crate::services::access;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
    registrar: Option<Arc<dyn RegistrarNotifier>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            registrar: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => access::storage_from_request(request),
        }
    }

    pub(crate) fn get_registrar(&self, request: &HttpRequest) -> Arc<dyn RegistrarNotifier> {
        match &self.registrar {
            Some(registrar) => registrar.clone(),
            None => access::registrar_from_request(request),
        }
    }

    // 教学班选课名单
    pub async fn list_section_enrollments(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        section_no: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_section_enrollments(self, request, principal, section_no).await
    }

    // 批量登记最终成绩
    pub async fn update_enrollment_grades(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        updates: Vec<UpdateEnrollmentGrade>,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment_grades(self, request, principal, updates).await
    }
}

pub mod create;
pub mod delete;
pub mod list;
pub mod sections;
pub mod student;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::models::auth::entities::Principal;
use crate::models::sections::requests::TermQuery;
use crate::registrar::RegistrarNotifier;
use crate::services::access;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
    registrar: Option<Arc<dyn RegistrarNotifier>>,
}

impl AssignmentService {
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

    // 教师在指定学期任教的教学班
    pub async fn list_instructor_sections(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        query: TermQuery,
    ) -> ActixResult<HttpResponse> {
        sections::list_instructor_sections(self, request, principal, query).await
    }

    // 教学班的作业
    pub async fn list_section_assignments(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        section_no: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_section_assignments(self, request, principal, section_no).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, principal, req).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, principal, req).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, principal, assignment_id).await
    }

    // 学生在指定学期的作业与得分
    pub async fn list_student_assignments(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        query: TermQuery,
    ) -> ActixResult<HttpResponse> {
        student::list_student_assignments(self, request, principal, query).await
    }
}

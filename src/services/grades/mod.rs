pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::entities::Principal;
use crate::models::grades::requests::UpdateGradeScore;
use crate::services::access;
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => access::storage_from_request(request),
        }
    }

    // 作业成绩列表，缺失的成绩行按需创建
    pub async fn list_assignment_grades(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignment_grades(self, request, principal, assignment_id).await
    }

    // 批量登记分数
    pub async fn update_grades(
        &self,
        request: &HttpRequest,
        principal: &Principal,
        updates: Vec<UpdateGradeScore>,
    ) -> ActixResult<HttpResponse> {
        update::update_grades(self, request, principal, updates).await
    }
}

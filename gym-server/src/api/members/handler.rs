//! Member API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shared::models::{Member, MemberCreate, MemberUpdate};

use crate::core::ServerState;
use crate::lifecycle::{MemberFilter, SubscriptionState, remaining_days, subscription_state};
use crate::utils::time::now_local;
use crate::AppResult;

const RESOURCE: &str = "members";

/// Member with the derived fields the cards display
#[derive(Debug, Serialize)]
pub struct MemberView {
    #[serde(flatten)]
    pub member: Member,
    pub display_id: String,
    pub membership_label: &'static str,
    pub subscription_state: SubscriptionState,
    pub remaining_days: i64,
}

impl MemberView {
    pub fn new(member: Member, now: NaiveDateTime) -> Self {
        let days = remaining_days(member.end_date, now);
        Self {
            display_id: member.display_id(),
            membership_label: member.membership_type.label(),
            subscription_state: subscription_state(days),
            remaining_days: days,
            member,
        }
    }
}

fn views(members: Vec<Member>) -> Vec<MemberView> {
    let now = now_local();
    members
        .into_iter()
        .map(|m| MemberView::new(m, now))
        .collect()
}

fn find(members: &[Member], id: i64) -> Option<&Member> {
    members.iter().find(|m| m.id == id)
}

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub id: i64,
}

/// GET /api/members?search=&status= - 会员列表 (搜索 AND 状态)
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<MemberFilter>,
) -> Json<Vec<MemberView>> {
    let members = state.members.list().await;
    let now = now_local();
    let filtered = filter
        .apply(&members, now)
        .into_iter()
        .map(|m| MemberView::new(m.clone(), now))
        .collect();
    Json(filtered)
}

/// GET /api/members/present - 当前在场会员
pub async fn present(State(state): State<ServerState>) -> Json<Vec<MemberView>> {
    Json(views(state.members.present().await))
}

/// GET /api/members/:id - 获取单个会员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MemberView>> {
    let member = state.members.get(id).await?;
    Ok(Json(MemberView::new(member, now_local())))
}

/// POST /api/members - 创建会员
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<Json<Vec<MemberView>>> {
    let members = state.members.add(payload).await?;
    state.broadcast_sync::<Member>(RESOURCE, "created", "*", None);
    Ok(Json(views(members)))
}

/// PUT /api/members/:id - 更新会员
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MemberUpdate>,
) -> AppResult<Json<Vec<MemberView>>> {
    let members = state.members.update(id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id.to_string(), find(&members, id));
    Ok(Json(views(members)))
}

/// DELETE /api/members/:id - 删除会员
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Json<Vec<MemberView>> {
    let members = state.members.delete(id).await;
    state.broadcast_sync::<Member>(RESOURCE, "deleted", &id.to_string(), None);
    Json(views(members))
}

/// POST /api/members/:id/attendance - 切换在场状态
pub async fn toggle_attendance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MemberView>>> {
    let members = state.members.toggle_attendance(id).await?;
    state.broadcast_sync(RESOURCE, "updated", &id.to_string(), find(&members, id));
    Ok(Json(views(members)))
}

/// POST /api/members/check-in - 按编号签到
pub async fn check_in(
    State(state): State<ServerState>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<Vec<MemberView>>> {
    let members = state.members.check_in(payload.id).await?;
    let id = payload.id.to_string();
    state.broadcast_sync(RESOURCE, "updated", &id, find(&members, payload.id));
    Ok(Json(views(members)))
}

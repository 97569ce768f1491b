// ABOUTME: Language catalog for default notification text.
// ABOUTME: Unknown selectors fall back to the English entry.

/// Text fragments a default block template is assembled from.
#[derive(Debug)]
pub struct Phrases {
    pub repository: &'static str,
    pub branch: &'static str,
    pub event: &'static str,
    pub commit: &'static str,
    pub deploy_started: &'static str,
    pub deploy_succeeded: &'static str,
    pub deploy_failed: &'static str,
    pub view_status: &'static str,
    pub confirm: &'static str,
    pub commit_info: &'static str,
}

/// The catalog entry used when the selector matches nothing.
pub const FALLBACK_LANGUAGE: &str = "eng";

static ENG: Phrases = Phrases {
    repository: "Repository",
    branch: "Branch",
    event: "Event",
    commit: "Commit",
    deploy_started: "Deploy started...",
    deploy_succeeded: "Deploy succeeded!!",
    deploy_failed: "Deploy failed!!",
    view_status: "Deploy status",
    confirm: "Confirm",
    commit_info: "Commit info",
};

static KOR: Phrases = Phrases {
    repository: "저장소",
    branch: "브랜치",
    event: "이벤트",
    commit: "커밋",
    deploy_started: "배포 시작...",
    deploy_succeeded: "배포 완료!!",
    deploy_failed: "배포 실패!!",
    view_status: "배포상태",
    confirm: "확인",
    commit_info: "커밋정보",
};

/// Look up the phrase set for a language selector.
pub fn phrases(language: &str) -> &'static Phrases {
    match language {
        "kor" => &KOR,
        _ => &ENG,
    }
}

//! Envelope and endpoint tests against a wiremock backend.

use std::sync::Arc;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fabula_api::{
    ApiClient, ApiError, ChapterScope, ChapterSplitRequest, PageRequest, PinyinCache,
    PinyinSource, ProjectType, TtsBackend,
};
use fabula_core::{ChapterId, MemoryNotifier, NotificationLevel, ProjectId};

fn client(server: &MockServer) -> (ApiClient, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let client = ApiClient::new(server.uri(), notifier.clone()).unwrap();
    (client, notifier)
}

#[tokio::test]
async fn list_projects_decodes_envelope_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textProject/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": [
                {"id": 1, "projectId": "p-1", "projectName": "Novel",
                 "projectType": "long_text", "chapterCount": 3},
                {"id": 2, "projectId": "p-2", "projectName": "Shorts",
                 "projectType": "short_text", "chapterCount": 0},
            ],
        })))
        .mount(&server)
        .await;

    let (client, notifier) = client(&server);
    let projects = client.list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].project_name, "Novel");
    assert_eq!(projects[1].project_type, ProjectType::ShortText);
    assert!(notifier.is_empty(), "success must not notify");
}

#[tokio::test]
async fn backend_failure_notifies_and_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textProject/chapterSplit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "5001",
            "msg": "pattern matched nothing",
        })))
        .mount(&server)
        .await;

    let (client, notifier) = client(&server);
    let request = ChapterSplitRequest {
        project_id: ProjectId::from("p-1"),
        chapter_pattern: "^Chapter".to_string(),
        dialogue_pattern: "\"".to_string(),
    };
    let err = client.chapter_split(&request).await.unwrap_err();

    match err {
        ApiError::Backend { code, message } => {
            assert_eq!(code, "5001");
            assert_eq!(message, "pattern matched nothing");
        }
        other => panic!("unexpected error: {other}"),
    }
    let delivered = notifier.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].level, NotificationLevel::Error);
    assert_eq!(delivered[0].title, "Request failed");
    assert_eq!(delivered[0].message, "pattern matched nothing");
}

#[tokio::test]
async fn backend_failure_without_msg_notifies_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textProject/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "code": "9999" })),
        )
        .mount(&server)
        .await;

    let (client, notifier) = client(&server);
    assert!(client.list_projects().await.is_err());
    assert_eq!(notifier.delivered()[0].message, "Error");
}

#[tokio::test]
async fn http_error_status_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textProject/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, notifier) = client(&server);
    let err = client.list_projects().await.unwrap_err();

    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(notifier.len(), 1, "transport failures also notify");
}

#[tokio::test]
async fn non_envelope_body_maps_to_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textProject/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let (client, notifier) = client(&server);
    let err = client.list_projects().await.unwrap_err();

    assert!(matches!(err, ApiError::Json(_)));
    assert_eq!(notifier.len(), 1);
}

#[tokio::test]
async fn chapters_sends_page_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textChapter/chapters"))
        .and(body_json(serde_json::json!({
            "projectId": "p-1",
            "current": 2,
            "pageSize": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": {
                "records": [
                    {"id": 11, "projectId": "p-1", "chapterId": "c-11",
                     "chapterName": "Chapter 11", "textNum": 120, "roleNum": 4},
                ],
                "total": 23,
            },
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let page = client
        .chapters(
            &ProjectId::from("p-1"),
            &PageRequest {
                current: 2,
                page_size: 10,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 23);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].chapter_name, "Chapter 11");
}

#[tokio::test]
async fn chapter_infos_decode_voice_and_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textChapter/chapterInfos"))
        .and(body_json(serde_json::json!({
            "projectId": "p-1",
            "chapterId": "c-1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": [{
                "id": "ci-1",
                "projectId": "p-1",
                "chapterId": "c-1",
                "paragraphIndex": 0,
                "sentenceIndex": 0,
                "text": "\"Run,\" she said.",
                "dialogueFlag": true,
                "role": "Mara",
                "audioState": 1,
                "amType": "fish_speech",
                "mcId": "mc-3",
            }],
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let scope = ChapterScope {
        project_id: ProjectId::from("p-1"),
        chapter_id: ChapterId::from("c-1"),
    };
    let infos = client.chapter_infos(&scope).await.unwrap();

    assert_eq!(infos.len(), 1);
    assert!(infos[0].dialogue_flag);
    assert_eq!(infos[0].voice.am_type, Some(TtsBackend::FishSpeech));
    assert_eq!(
        infos[0].audio_task_state(),
        Some(fabula_api::AudioTaskState::Process)
    );
}

#[tokio::test]
async fn voice_models_hit_backend_segment_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/model/gpt-sovits/queryModels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": [{"id": 1, "name": "narrator", "group": "cn",
                      "gptWeights": "g.ckpt", "sovitsWeights": "s.pth"}],
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let models = client.voice_models(TtsBackend::GptSovits).await.unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "narrator");
}

#[tokio::test]
async fn pinyin_cache_loads_through_api_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pinyin/getPinyinData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": {
                "U+4E2D": ["zhōng", "zhòng"],
                "U+6587": ["wén"],
            },
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let cache = PinyinCache::new();
    let loaded = cache.load_from(&client).await.unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(
        cache.lookup('中'),
        Some(vec!["zhōng".to_string(), "zhòng".to_string()])
    );
    assert_eq!(cache.lookup('文'), Some(vec!["wén".to_string()]));
    assert_eq!(cache.lookup('a'), None);
}

#[tokio::test]
async fn check_role_inference_returns_bare_bool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textChapter/checkRoleInference"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": true,
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let scope = ChapterScope {
        project_id: ProjectId::from("p-1"),
        chapter_id: ChapterId::from("c-1"),
    };
    assert!(client.check_role_inference(&scope).await.unwrap());
}

#[tokio::test]
async fn success_without_data_is_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/textChapter/getContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "code": "0000", "msg": "ok" })),
        )
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let scope = ChapterScope {
        project_id: ProjectId::from("p-1"),
        chapter_id: ChapterId::from("c-1"),
    };
    let err = client.chapter_content(&scope).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingData(_)));
}

#[tokio::test]
async fn pinyin_source_usable_as_trait_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pinyin/getPinyinData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0000",
            "msg": "ok",
            "data": {},
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let source: Arc<dyn PinyinSource> = Arc::new(client);
    let table = source.fetch_pinyin_table().await.unwrap();
    assert!(table.is_empty());
}

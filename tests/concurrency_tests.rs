use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use assetmatch::{
    AssetMatcher, Catalog, EmbeddingProvider, EmbeddingVector, MatchEngine, MatchMethod,
    SemanticError, StubProvider,
};

/// Stub embeddings behind an artificial delay.
struct SlowProvider {
    inner: StubProvider,
    delay: Duration,
    calls: AtomicUsize,
}

impl SlowProvider {
    fn new(delay: Duration) -> Self {
        Self {
            inner: StubProvider::new(384),
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

impl EmbeddingProvider for SlowProvider {
    fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.inner.embed(text)
    }

    fn model_name(&self) -> &str {
        "slow-stub"
    }
}

fn matcher_with(provider: Arc<SlowProvider>, timeout: Option<Duration>) -> AssetMatcher {
    let engine = MatchEngine::new(Arc::new(Catalog::reference()), Some(provider));
    AssetMatcher::new(engine).with_semantic_timeout(timeout)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn timeout_returns_keyword_result() {
    let provider = Arc::new(SlowProvider::new(Duration::from_millis(200)));
    let matcher = matcher_with(provider, Some(Duration::from_millis(10)));

    let result = matcher
        .match_prompt_with_timeout("a desk lamp for studying")
        .await
        .unwrap();
    assert_eq!(result.method, MatchMethod::Keyword);
    assert_eq!(result.asset.id, "chair");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generous_timeout_keeps_semantic_result() {
    let provider = Arc::new(SlowProvider::new(Duration::from_millis(1)));
    let matcher = matcher_with(provider, Some(Duration::from_secs(30)));

    let result = matcher
        .match_prompt_with_timeout("a modern vase with flowers")
        .await
        .unwrap();
    assert_eq!(result.method, MatchMethod::Semantic);
    assert_eq!(result.asset.id, "vase");
}

#[tokio::test]
async fn no_timeout_waits_for_semantic() {
    let provider = Arc::new(SlowProvider::new(Duration::from_millis(5)));
    let matcher = matcher_with(provider, None);

    let result = matcher
        .match_prompt_with_timeout("a modern vase with flowers")
        .await
        .unwrap();
    assert_eq!(result.method, MatchMethod::Semantic);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_share_one_catalog_embedding() {
    let provider = Arc::new(SlowProvider::new(Duration::from_millis(2)));
    let matcher = matcher_with(provider.clone(), None);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let matcher = matcher.clone();
        handles.push(tokio::spawn(async move {
            matcher
                .match_prompt_with_timeout("a modern vase with flowers")
                .await
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.asset.id, "vase");
    }

    // 16 prompt embeddings plus one pass over the six catalog entries.
    assert_eq!(provider.calls.load(Ordering::SeqCst), 16 + 6);
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(MatchEngine::new(
        Arc::new(Catalog::reference()),
        Some(Arc::new(StubProvider::new(384))),
    ));

    let handles: Vec<_> = ["a piece of fruit", "an astronaut in space", "a desk lamp for studying"]
        .into_iter()
        .map(|prompt| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || (prompt, engine.find_best_match(prompt)))
        })
        .collect();

    for handle in handles {
        let (prompt, result) = handle.join().unwrap();
        assert_eq!(result, engine.find_best_match(prompt));
    }
}

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{github::CommitRecord, TrackedRepository, WeekWindow, WeeklyProgress};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info, instrument};

use crate::{api::GithubApi, error::FetchError};

pub type WindowClock = Arc<dyn Fn() -> WeekWindow + Send + Sync>;

/// Everything a widget needs besides its own repository.
#[derive(Clone)]
pub struct Context {
    pub github: Arc<dyn GithubApi>,
    pub marker: Arc<str>,
    pub clock: WindowClock,
}

impl Context {
    pub fn new(github: Arc<dyn GithubApi>, marker: impl Into<Arc<str>>) -> Self {
        Self {
            github,
            marker: marker.into(),
            clock: Arc::new(WeekWindow::current),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> WeekWindow + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetViewState {
    pub weekly_match_count: u32,
    pub below_threshold: bool,
    /// Server order, newest first.
    pub commits: Vec<CommitRecord>,
    /// Empty when the profile has no avatar.
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetStatus {
    Idle,
    Loading,
    Ready,
    Failed(FetchError),
}

impl WidgetStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, WidgetStatus::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub repository: TrackedRepository,
    pub status: WidgetStatus,
    pub view: WidgetViewState,
}

impl WidgetSnapshot {
    fn idle(repository: TrackedRepository) -> Self {
        Self {
            repository,
            status: WidgetStatus::Idle,
            view: WidgetViewState::default(),
        }
    }
}

/// One fetch cycle: compute the week, read commits and profile, count matches.
///
/// Both reads run concurrently and both must succeed; otherwise nothing is produced.
#[instrument(skip(context, repository), fields(repo = %repository.full_id()))]
pub async fn fetch_cycle(
    context: &Context,
    repository: &TrackedRepository,
) -> Result<WidgetViewState, FetchError> {
    let window = (context.clock)();
    debug!("Fetching commits between {} and {}", window.since(), window.until());

    let (commits, profile) = tokio::join!(
        context.github.list_commits(repository, &window),
        context.github.user_profile(&repository.owner),
    );
    let commits = commits?;
    let profile = profile?;

    let progress =
        WeeklyProgress::evaluate(&commits, &window, &context.marker, repository.min_count);
    info!(
        "{} matching commits out of {} in {}",
        progress.count,
        commits.len(),
        window.label()
    );

    Ok(WidgetViewState {
        weekly_match_count: progress.count,
        below_threshold: progress.below_threshold,
        commits,
        avatar_url: profile.avatar_url.unwrap_or_default(),
    })
}

/// Progress card for one repository.
///
/// Every change of the repository starts a new fetch cycle and aborts the previous one.
/// A cycle only applies its result while it is still the latest one, so a slow stale
/// response can never overwrite a newer state.
pub struct ProgressWidget {
    context: Context,
    state: Arc<watch::Sender<WidgetSnapshot>>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl ProgressWidget {
    pub fn new(context: Context, repository: TrackedRepository) -> Self {
        let (state, _) = watch::channel(WidgetSnapshot::idle(repository));
        Self {
            context,
            state: Arc::new(state),
            generation: Default::default(),
            task: None,
        }
    }

    /// Creates the widget and starts its first fetch cycle.
    pub fn mount(context: Context, repository: TrackedRepository) -> Self {
        let mut widget = Self::new(context, repository.clone());
        widget.start(repository);
        widget
    }

    /// Applies new props. Unchanged props keep the current state and trigger nothing.
    pub fn update(&mut self, repository: TrackedRepository) {
        if self.state.borrow().repository == repository {
            return;
        }
        self.start(repository);
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        self.state.borrow().clone()
    }

    /// Waits until the latest fetch cycle has finished.
    pub async fn settled(&self) -> WidgetSnapshot {
        let mut updates = self.state.subscribe();
        let settled = match updates.wait_for(|snapshot| !snapshot.status.is_loading()).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    fn start(&mut self, repository: TrackedRepository) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }

        self.state.send_modify(|snapshot| {
            snapshot.repository = repository.clone();
            snapshot.status = WidgetStatus::Loading;
        });

        let context = self.context.clone();
        let state = self.state.clone();
        let latest = self.generation.clone();
        self.task = Some(tokio::spawn(async move {
            let result = fetch_cycle(&context, &repository).await;
            state.send_if_modified(|snapshot| {
                if latest.load(Ordering::SeqCst) != generation {
                    debug!("Discarding stale result for {}", repository.full_id());
                    return false;
                }

                match result {
                    Ok(view) => {
                        snapshot.view = view;
                        snapshot.status = WidgetStatus::Ready;
                    }
                    Err(e) => {
                        error!("Failed to fetch progress for {}: {e}", repository.full_id());
                        snapshot.status = WidgetStatus::Failed(e);
                    }
                }
                true
            });
        }));
    }
}

impl Drop for ProgressWidget {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shared::github::UserProfile;

    use super::*;
    use crate::{
        api::mock::{commit, fixed_window, MockGithub},
        error::Endpoint,
    };

    const MARKER: &str = "BaekjoonHub";

    fn context(github: Arc<MockGithub>) -> Context {
        Context::new(github, MARKER).with_clock(fixed_window)
    }

    fn seeded(repository: &TrackedRepository) -> MockGithub {
        let window = fixed_window();
        let day = window.start() + chrono::Duration::days(1);
        let github = MockGithub::default();
        github.set_commits(
            repository,
            Ok(vec![
                commit("[Level 1] Title: Two Sum, -BaekjoonHub", day),
                commit("[Level 2] Title: Three Sum, -BaekjoonHub", day),
                commit("Update README", day),
            ]),
        );
        github.set_profile(
            &repository.owner,
            Ok(UserProfile {
                avatar_url: Some("https://avatars.example.com/u/1".to_string()),
            }),
        );
        github
    }

    #[tokio::test]
    async fn mount_reaches_ready() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let widget = ProgressWidget::mount(context(github), repository.clone());

        let snapshot = widget.settled().await;

        assert_eq!(snapshot.status, WidgetStatus::Ready);
        assert_eq!(snapshot.repository, repository);
        assert_eq!(snapshot.view.weekly_match_count, 2);
        assert!(snapshot.view.below_threshold);
        assert_eq!(snapshot.view.commits.len(), 3);
        assert_eq!(snapshot.view.avatar_url, "https://avatars.example.com/u/1");
    }

    #[tokio::test]
    async fn new_widget_is_idle_until_mounted() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let widget = ProgressWidget::new(context(github.clone()), repository);

        assert_eq!(widget.snapshot().status, WidgetStatus::Idle);
        assert_eq!(github.commit_requests(), 0);
    }

    #[tokio::test]
    async fn settled_does_not_wait_on_idle_widget() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let widget = ProgressWidget::new(context(github), repository.clone());

        let snapshot = tokio::time::timeout(Duration::from_secs(1), widget.settled())
            .await
            .unwrap();

        assert_eq!(snapshot.status, WidgetStatus::Idle);
        assert_eq!(snapshot.repository, repository);
    }

    #[tokio::test]
    async fn missing_avatar_renders_blank() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = seeded(&repository);
        github.set_profile("annyoon", Ok(UserProfile::default()));
        let widget = ProgressWidget::mount(context(Arc::new(github)), repository);

        let snapshot = widget.settled().await;

        assert_eq!(snapshot.status, WidgetStatus::Ready);
        assert_eq!(snapshot.view.avatar_url, "");
    }

    #[tokio::test]
    async fn first_failure_leaves_empty_state() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = seeded(&repository);
        let failure = FetchError::Status {
            endpoint: Endpoint::Commits,
            message: "Not Found".to_string(),
        };
        github.set_commits(&repository, Err(failure.clone()));
        let widget = ProgressWidget::mount(context(Arc::new(github)), repository);

        let snapshot = widget.settled().await;

        assert_eq!(snapshot.status, WidgetStatus::Failed(failure));
        assert_eq!(snapshot.view, WidgetViewState::default());
    }

    #[tokio::test]
    async fn failed_profile_keeps_previous_state() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let mut widget = ProgressWidget::mount(context(github.clone()), repository.clone());
        let ready = widget.settled().await;
        assert_eq!(ready.status, WidgetStatus::Ready);

        let failure = FetchError::Transport {
            endpoint: Endpoint::Profile,
            message: "connection reset".to_string(),
        };
        github.set_profile("annyoon", Err(failure.clone()));
        widget.update(repository.with_min_count(1));
        let snapshot = widget.settled().await;

        assert_eq!(snapshot.status, WidgetStatus::Failed(failure));
        assert_eq!(snapshot.view, ready.view);
        assert!(snapshot.view.below_threshold);
    }

    #[tokio::test]
    async fn threshold_follows_min_count() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let mut widget = ProgressWidget::mount(context(github.clone()), repository.clone());
        assert!(widget.settled().await.view.below_threshold);

        widget.update(repository.with_min_count(2));
        let snapshot = widget.settled().await;

        assert_eq!(snapshot.status, WidgetStatus::Ready);
        assert!(!snapshot.view.below_threshold);
        assert_eq!(github.commit_requests(), 2);
    }

    #[tokio::test]
    async fn unchanged_props_do_not_refetch() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let mut widget = ProgressWidget::mount(context(github.clone()), repository.clone());
        widget.settled().await;

        widget.update(repository);
        widget.settled().await;

        assert_eq!(github.commit_requests(), 1);
    }

    #[tokio::test]
    async fn stale_result_is_discarded() {
        let slow = TrackedRepository::new("annyoon", "slow");
        let fast = TrackedRepository::new("annyoon", "ps");
        let github = seeded(&fast);
        github.set_commits(
            &slow,
            Ok(vec![commit("BaekjoonHub", fixed_window().start())]),
        );
        let gate = github.gate(&slow);
        let github = Arc::new(github);

        let mut widget = ProgressWidget::mount(context(github.clone()), slow);
        tokio::task::yield_now().await;
        assert!(widget.snapshot().status.is_loading());

        widget.update(fast.clone());
        let snapshot = widget.settled().await;
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(snapshot.repository, fast);
        assert_eq!(widget.snapshot(), snapshot);
        assert_eq!(widget.snapshot().view.weekly_match_count, 2);
        assert_eq!(widget.snapshot().view.commits.len(), 3);
    }

    #[tokio::test]
    async fn refetch_is_idempotent() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = Arc::new(seeded(&repository));
        let context = context(github);

        let first = fetch_cycle(&context, &repository).await.unwrap();
        let second = fetch_cycle(&context, &repository).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn commits_outside_window_are_listed_but_not_counted() {
        let repository = TrackedRepository::new("annyoon", "ps");
        let github = seeded(&repository);
        let before = fixed_window().start() - chrono::Duration::seconds(1);
        github.set_commits(
            &repository,
            Ok(vec![
                commit("[Level 1] Title: Old, -BaekjoonHub", before),
                commit("[Level 1] Title: New, -BaekjoonHub", fixed_window().end()),
            ]),
        );

        let view = fetch_cycle(&context(Arc::new(github)), &repository)
            .await
            .unwrap();

        assert_eq!(view.weekly_match_count, 1);
        assert_eq!(view.commits.len(), 2);
    }
}

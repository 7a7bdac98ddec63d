use futures::future::join_all;
use shared::TrackedRepository;
use tracing::info;

use crate::widget::{Context, ProgressWidget, WidgetSnapshot};

/// Heading plus one progress widget per tracked repository, in the given order.
pub struct Dashboard {
    heading: String,
    widgets: Vec<ProgressWidget>,
}

impl Dashboard {
    pub fn mount(
        context: Context,
        heading: impl Into<String>,
        repositories: impl IntoIterator<Item = TrackedRepository>,
    ) -> Self {
        let widgets: Vec<_> = repositories
            .into_iter()
            .map(|repository| ProgressWidget::mount(context.clone(), repository))
            .collect();
        info!("Mounted {} widgets", widgets.len());

        Self {
            heading: heading.into(),
            widgets,
        }
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn snapshots(&self) -> Vec<WidgetSnapshot> {
        self.widgets.iter().map(ProgressWidget::snapshot).collect()
    }

    /// Waits for every widget to finish its current fetch cycle.
    pub async fn settled(&self) -> Vec<WidgetSnapshot> {
        join_all(self.widgets.iter().map(|widget| widget.settled())).await
    }
}

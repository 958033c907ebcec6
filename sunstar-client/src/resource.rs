//! Resource-fetch hooks
//!
//! A [`ResourceHook`] performs one fetch when mounted and exposes
//! `{data, loading, error}` through a `watch` channel. It refetches only
//! when its declared parameters change or on an explicit [`refresh`].
//! There is no retry, caching or request de-duplication; every hook
//! instance is independent.
//!
//! [`refresh`]: ResourceHook::refresh

use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use shared::models::{Advantage, Category, CompanyInfo, SiteStats, Testimonial};
use tokio::sync::watch;

use crate::ClientResult;
use crate::api::SiteApi;
use crate::client::HttpClient;

/// Read model of one resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// Set if and only if the last fetch failed
    pub error: Option<String>,
}

impl<T> ResourceState<T> {
    /// State before the first fetch completes
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none() && self.data.is_some()
    }
}

type Fetcher<P, T> = Box<dyn Fn(P) -> BoxFuture<'static, ClientResult<T>> + Send + Sync>;

/// Fetch-on-mount accessor for one backend resource
pub struct ResourceHook<P, T> {
    name: &'static str,
    params: P,
    fetcher: Fetcher<P, T>,
    state: watch::Sender<ResourceState<T>>,
    mounted: bool,
}

impl<P, T> fmt::Debug for ResourceHook<P, T>
where
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHook")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl<P, T> ResourceHook<P, T>
where
    P: Clone + PartialEq + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(name: &'static str, params: P, fetch: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let (state, _) = watch::channel(ResourceState::pending());
        Self {
            name,
            params,
            fetcher: Box::new(move |p| fetch(p).boxed()),
            state,
            mounted: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    /// Run the initial fetch; later calls return the current state untouched
    pub async fn mount(&mut self) -> ResourceState<T> {
        if !self.mounted {
            self.mounted = true;
            self.load().await;
        }
        self.state()
    }

    /// Replace the declared parameters, refetching only when they changed
    ///
    /// Returns `None` when the parameters were equal and nothing happened.
    pub async fn set_params(&mut self, params: P) -> Option<ResourceState<T>> {
        if self.params == params {
            return None;
        }
        self.params = params;
        if !self.mounted {
            return Some(self.state());
        }
        self.load().await;
        Some(self.state())
    }

    /// Manual retry affordance
    pub async fn refresh(&mut self) -> ResourceState<T> {
        self.mounted = true;
        self.load().await;
        self.state()
    }

    async fn load(&mut self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = (self.fetcher)(self.params.clone()).await;

        match result {
            Ok(data) => {
                tracing::debug!("Fetched {}", self.name);
                self.state.send_modify(|s| {
                    s.data = Some(data);
                    s.loading = false;
                    s.error = None;
                });
            }
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", self.name, e);
                // prior data is kept
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }
}

// ========== Hooks per resource ==========

pub fn company_info<C>(api: &SiteApi<C>) -> ResourceHook<(), CompanyInfo>
where
    C: HttpClient + 'static,
{
    let api = api.clone();
    ResourceHook::new("company info", (), move |_| {
        let api = api.clone();
        async move { api.company_info().await }
    })
}

pub fn product_categories<C>(api: &SiteApi<C>) -> ResourceHook<(), Vec<Category>>
where
    C: HttpClient + 'static,
{
    let api = api.clone();
    ResourceHook::new("product categories", (), move |_| {
        let api = api.clone();
        async move { api.product_categories().await }
    })
}

/// Parameterised by `featured_only`
pub fn testimonials<C>(api: &SiteApi<C>, featured_only: bool) -> ResourceHook<bool, Vec<Testimonial>>
where
    C: HttpClient + 'static,
{
    let api = api.clone();
    ResourceHook::new("testimonials", featured_only, move |featured_only| {
        let api = api.clone();
        async move { api.testimonials(featured_only).await }
    })
}

pub fn advantages<C>(api: &SiteApi<C>) -> ResourceHook<(), Vec<Advantage>>
where
    C: HttpClient + 'static,
{
    let api = api.clone();
    ResourceHook::new("advantages", (), move |_| {
        let api = api.clone();
        async move { api.advantages().await }
    })
}

pub fn site_stats<C>(api: &SiteApi<C>) -> ResourceHook<(), SiteStats>
where
    C: HttpClient + 'static,
{
    let api = api.clone();
    ResourceHook::new("site stats", (), move |_| {
        let api = api.clone();
        async move { api.stats().await }
    })
}

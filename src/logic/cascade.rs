//! Dependent-selection cascade
//!
//! [`SessionState`] owns everything the user has picked and everything the
//! backend has answered. It is a reducer: [`SessionState::apply`] takes one
//! [`Event`] at a time and returns the [`Effect`]s (fetches) the caller must
//! run. Fetch results come back as events too, so all state changes happen
//! in one place, one event at a time.
//!
//! # Cascade
//!
//! ```text
//! architecture ──clears──▶ category ──fetch──▶ families ──default──▶ family
//!                                                                    │
//!                           region ──────(family set)──────fetch──▶ sizes ──best match──▶ size
//! ```
//!
//! # Stale responses
//!
//! Every fetch carries a [`RequestTag`]. Dispatching or invalidating a kind of
//! request bumps its generation, so a response whose tag is no longer current
//! is dropped without touching state.

use std::time::Instant;

use serde_json::Value;
use strum::Display;
use tracing::{debug, info, warn};

use crate::gateway::{
    Category, DetailQuery, FamilyQuery, GatewayResult, InstanceFamily,
    InstanceProductQuery, InstanceSize, Operation, PricedProduct, Region, SizeQuery,
    VolumeProductQuery, VolumeType,
};
use crate::logic::comparison::{AddOutcome, ComparisonKey, ComparisonList};
use crate::logic::family::default_family;
use crate::logic::options::OptionList;
use crate::logic::pricing::price_change_percent;
use crate::logic::sizes::{best_match, size_suffix, sort_by_rank};
use crate::types::{Architecture, Validity};

/// Feedback when the family list could not be fetched
pub const FAMILY_RETRY_MESSAGE: &str = "Failed to load instance families. Please try again.";

/// Feedback when the size list could not be fetched
pub const SIZE_RETRY_MESSAGE: &str = "Failed to load instance types. Please try again.";

/// Smallest EBS volume size accepted, in GiB
pub const MIN_VOLUME_SIZE: u32 = 1;

/// Largest EBS volume size accepted, in GiB
pub const MAX_VOLUME_SIZE: u32 = 65536;

/// Feedback for a size list that resolved empty
pub fn unsupported_family_message(family: &str) -> String {
    format!("\"{family}\" is not supported in this region.")
}

// ============================================================================
// Selection and catalog
// ============================================================================

/// The user's current picks.
///
/// `size` is always empty or a member of the size list resolved for
/// (`region`, `architecture`, `family`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub region: String,
    pub architecture: Architecture,
    pub category: String,
    pub family: String,
    pub size: String,
    pub operation: String,
    pub volume_type: String,
    pub volume_size: u32,
}

/// Starting values for a session, usually taken from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub region: String,
    pub architecture: Architecture,
    /// Category selected once the catalog arrives, if it exists
    pub category: String,
    /// Platform whose operation is selected once the catalog arrives
    pub platform: String,
    pub volume_type: String,
    pub volume_size: u32,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            architecture: Architecture::X86_64,
            category: "general".to_string(),
            platform: "Linux/UNIX".to_string(),
            volume_type: "gp3".to_string(),
            volume_size: 60,
        }
    }
}

impl From<&SessionDefaults> for Selection {
    fn from(defaults: &SessionDefaults) -> Self {
        Self {
            region: defaults.region.clone(),
            architecture: defaults.architecture,
            category: String::new(),
            family: String::new(),
            size: String::new(),
            operation: String::new(),
            volume_type: defaults.volume_type.clone(),
            volume_size: defaults.volume_size,
        }
    }
}

/// Option sets loaded once at startup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub regions: Vec<Region>,
    pub operations: Vec<Operation>,
    pub categories: Vec<Category>,
    pub volume_types: Vec<VolumeType>,
}

// ============================================================================
// Request tagging
// ============================================================================

/// Kind of fetch, one generation counter each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RequestKind {
    Catalog,
    Families,
    Sizes,
    InstanceProduct,
    VolumeProduct,
    Detail,
}

impl RequestKind {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// Identity of one dispatched fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Generations([u64; RequestKind::COUNT]);

impl Generations {
    /// Start a new request of `kind`, superseding any in flight.
    fn next(&mut self, kind: RequestKind) -> RequestTag {
        self.invalidate(kind);
        RequestTag {
            kind,
            generation: self.0[kind.index()],
        }
    }

    fn invalidate(&mut self, kind: RequestKind) {
        self.0[kind.index()] += 1;
    }

    fn is_current(&self, tag: RequestTag) -> bool {
        self.0[tag.kind.index()] == tag.generation
    }
}

// ============================================================================
// Events and effects
// ============================================================================

/// Everything that can change the session: user input and fetch results.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CatalogRequested,
    CatalogLoaded {
        tag: RequestTag,
        result: GatewayResult<Catalog>,
    },
    RegionChanged(String),
    ArchitectureChanged(Architecture),
    CategoryChanged(String),
    FamilyChanged(String),
    SizeChanged(String),
    OperationChanged(String),
    VolumeTypeChanged(String),
    VolumeSizeChanged(u32),
    FamiliesLoaded {
        tag: RequestTag,
        result: GatewayResult<Vec<InstanceFamily>>,
    },
    SizesLoaded {
        tag: RequestTag,
        result: GatewayResult<Vec<InstanceSize>>,
    },
    QuickLookRequested,
    InstanceProductLoaded {
        tag: RequestTag,
        result: GatewayResult<PricedProduct>,
    },
    VolumeProductLoaded {
        tag: RequestTag,
        result: GatewayResult<PricedProduct>,
    },
    DetailRequested,
    DetailLoaded {
        tag: RequestTag,
        result: GatewayResult<Value>,
    },
    CompareRequested {
        now: Instant,
    },
    CompareRemoved(usize),
    Tick(Instant),
    /// Re-run whichever fetch last failed
    RetryRequested,
}

/// A fetch the caller must perform and answer with the matching event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCatalog {
        tag: RequestTag,
    },
    FetchFamilies {
        tag: RequestTag,
        query: FamilyQuery,
    },
    FetchSizes {
        tag: RequestTag,
        query: SizeQuery,
    },
    FetchInstanceProduct {
        tag: RequestTag,
        query: InstanceProductQuery,
    },
    FetchVolumeProduct {
        tag: RequestTag,
        query: VolumeProductQuery,
    },
    FetchDetail {
        tag: RequestTag,
        query: DetailQuery,
    },
}

impl Effect {
    pub fn tag(&self) -> RequestTag {
        match self {
            Self::FetchCatalog { tag }
            | Self::FetchFamilies { tag, .. }
            | Self::FetchSizes { tag, .. }
            | Self::FetchInstanceProduct { tag, .. }
            | Self::FetchVolumeProduct { tag, .. }
            | Self::FetchDetail { tag, .. } => *tag,
        }
    }
}

// ============================================================================
// Session state
// ============================================================================

/// One priced lookup (instance or volume) as shown on its card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductCard {
    pub product: Option<PricedProduct>,
    pub loading: bool,
    pub feedback: Option<String>,
}

impl ProductCard {
    /// The product, if the backend returned a price for it
    pub fn priced(&self) -> Option<&PricedProduct> {
        self.product.as_ref().filter(|p| p.list_price.is_some())
    }

    fn start(&mut self) {
        self.loading = true;
        self.feedback = None;
    }

    fn finish(&mut self, result: GatewayResult<PricedProduct>, what: &str) {
        self.loading = false;
        match result {
            Ok(product) => {
                self.feedback = product
                    .list_price
                    .is_none()
                    .then(|| format!("No price found for this {what}."));
                self.product = Some(product);
            }
            Err(e) => {
                warn!("{} lookup failed: {}", what, e);
                self.product = None;
                self.feedback = Some(format!("Failed to load {what} price: {e}"));
            }
        }
    }
}

/// Instance detail lookup for the last priced instance
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailView {
    pub value: Option<Value>,
    pub loading: bool,
    pub feedback: Option<String>,
}

/// Session state for one interactive lookup session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub selection: Selection,
    pub regions: OptionList<Region>,
    pub operations: OptionList<Operation>,
    pub categories: OptionList<Category>,
    pub volume_types: OptionList<VolumeType>,
    pub families: OptionList<InstanceFamily>,
    pub sizes: OptionList<InstanceSize>,
    pub catalog_loading: bool,
    pub instance: ProductCard,
    pub volume: ProductCard,
    /// Instance price before the latest quick look
    pub previous_price: Option<f64>,
    /// Last instance price a lookup actually returned
    last_price: Option<f64>,
    pub detail: DetailView,
    pub comparison: ComparisonList,
    /// One-line status for the footer
    pub status: Option<String>,
    defaults: SessionDefaults,
    generations: Generations,
    /// Size tier waiting for the in-flight size list
    carried_suffix: Option<String>,
    /// Key of the instance lookup in flight
    pending_instance: Option<ComparisonKey>,
    /// Key the current instance product was fetched for
    instance_key: Option<ComparisonKey>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionDefaults::default())
    }
}

impl SessionState {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            selection: Selection::from(&defaults),
            regions: OptionList::new(),
            operations: OptionList::new(),
            categories: OptionList::new(),
            volume_types: OptionList::new(),
            families: OptionList::new(),
            sizes: OptionList::new(),
            catalog_loading: false,
            instance: ProductCard::default(),
            volume: ProductCard::default(),
            previous_price: None,
            last_price: None,
            detail: DetailView::default(),
            comparison: ComparisonList::new(),
            status: None,
            defaults,
            generations: Generations::default(),
            carried_suffix: None,
            pending_instance: None,
            instance_key: None,
        }
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    pub fn carried_suffix(&self) -> Option<&str> {
        self.carried_suffix.as_deref()
    }

    /// (region, instance type) the shown instance product belongs to
    pub fn instance_key(&self) -> Option<&ComparisonKey> {
        self.instance_key.as_ref()
    }

    pub fn family_loading(&self) -> bool {
        self.families.validity() == Validity::Loading
    }

    pub fn sizes_loading(&self) -> bool {
        self.sizes.validity() == Validity::Loading
    }

    /// Whether the quick look action is enabled
    pub fn can_query(&self) -> bool {
        !self.selection.size.is_empty()
            && !self.families.validity().is_error()
            && !self.sizes.validity().is_error()
            && !self.instance.loading
            && !self.volume.loading
    }

    /// Whether the last quick look priced the instance or the volume
    pub fn any_priced(&self) -> bool {
        self.instance.priced().is_some() || self.volume.priced().is_some()
    }

    /// Whether adding to the comparison would insert a row
    pub fn can_compare(&self) -> bool {
        self.instance_key.is_some() && self.comparison.can_add(self.instance.priced())
    }

    /// Percent change of the instance price since the previous quick look
    pub fn price_change(&self) -> Option<f64> {
        let current = self.instance.priced()?.price_value()?;
        price_change_percent(self.previous_price, current)
    }

    /// Apply one event and return the fetches it requires.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::CatalogRequested => self.request_catalog(),
            Event::CatalogLoaded { tag, result } => self.on_catalog_loaded(tag, result),
            Event::RegionChanged(region) => self.on_region_change(region),
            Event::ArchitectureChanged(arch) => self.on_architecture_change(arch),
            Event::CategoryChanged(category) => self.on_category_change(category),
            Event::FamilyChanged(family) => self.on_family_change(family),
            Event::SizeChanged(size) => {
                self.on_size_change(size);
                Vec::new()
            }
            Event::OperationChanged(operation) => {
                self.selection.operation = operation;
                Vec::new()
            }
            Event::VolumeTypeChanged(volume_type) => {
                self.selection.volume_type = volume_type;
                Vec::new()
            }
            Event::VolumeSizeChanged(size) => {
                self.on_volume_size_change(size);
                Vec::new()
            }
            Event::FamiliesLoaded { tag, result } => self.on_families_loaded(tag, result),
            Event::SizesLoaded { tag, result } => {
                self.on_sizes_loaded(tag, result);
                Vec::new()
            }
            Event::QuickLookRequested => self.quick_look(),
            Event::InstanceProductLoaded { tag, result } => {
                self.on_instance_loaded(tag, result);
                Vec::new()
            }
            Event::VolumeProductLoaded { tag, result } => {
                if self.accept(tag) {
                    self.volume.finish(result, "volume");
                }
                Vec::new()
            }
            Event::DetailRequested => self.request_detail(),
            Event::DetailLoaded { tag, result } => {
                self.on_detail_loaded(tag, result);
                Vec::new()
            }
            Event::CompareRequested { now } => {
                self.add_to_comparison(now);
                Vec::new()
            }
            Event::CompareRemoved(index) => {
                self.remove_from_comparison(index);
                Vec::new()
            }
            Event::Tick(now) => {
                self.comparison.expire_highlights(now);
                Vec::new()
            }
            Event::RetryRequested => self.retry(),
        }
    }

    fn accept(&self, tag: RequestTag) -> bool {
        let current = self.generations.is_current(tag);
        if !current {
            debug!("Dropping stale {} response (generation {})", tag.kind, tag.generation);
        }
        current
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    fn request_catalog(&mut self) -> Vec<Effect> {
        self.catalog_loading = true;
        self.status = Some("Loading catalog...".to_string());
        vec![Effect::FetchCatalog {
            tag: self.generations.next(RequestKind::Catalog),
        }]
    }

    fn on_catalog_loaded(&mut self, tag: RequestTag, result: GatewayResult<Catalog>) -> Vec<Effect> {
        if !self.accept(tag) {
            return Vec::new();
        }
        self.catalog_loading = false;

        let catalog = match result {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                self.status = Some(format!("Failed to load catalog: {e}. Press r to retry."));
                return Vec::new();
            }
        };

        info!(
            "Catalog loaded: {} regions, {} operations, {} categories, {} volume types",
            catalog.regions.len(),
            catalog.operations.len(),
            catalog.categories.len(),
            catalog.volume_types.len()
        );
        self.status = None;
        self.regions.resolve(catalog.regions);
        self.operations.resolve(catalog.operations);
        self.categories.resolve(catalog.categories);
        self.volume_types.resolve(catalog.volume_types);

        if !self.regions.contains(&self.selection.region) {
            if let Some(first) = self.regions.first() {
                self.selection.region = first.code.clone();
            }
        }

        if !self.operations.contains(&self.selection.operation) {
            let platform = &self.defaults.platform;
            let operation = self
                .operations
                .entries()
                .iter()
                .find(|op| op.platform == *platform)
                .or_else(|| self.operations.first())
                .map(|op| op.operation.clone());
            self.selection.operation = operation.unwrap_or_default();
        }

        if !self.volume_types.contains(&self.selection.volume_type) {
            if let Some(first) = self.volume_types.first() {
                self.selection.volume_type = first.0.clone();
            }
        }

        if self.selection.category.is_empty() {
            if self.categories.contains(&self.defaults.category) {
                let category = self.defaults.category.clone();
                return self.on_category_change(category);
            }
            return Vec::new();
        }
        self.request_families()
    }

    // ------------------------------------------------------------------------
    // Cascade
    // ------------------------------------------------------------------------

    fn on_region_change(&mut self, region: String) -> Vec<Effect> {
        if region == self.selection.region {
            return Vec::new();
        }
        debug!("Region: {} -> {}", self.selection.region, region);
        self.selection.region = region;

        // Availability changed, taxonomy did not
        if self.selection.family.is_empty() {
            return Vec::new();
        }
        self.request_sizes()
    }

    fn on_architecture_change(&mut self, architecture: Architecture) -> Vec<Effect> {
        if architecture == self.selection.architecture {
            return Vec::new();
        }
        debug!("Architecture: {} -> {}", self.selection.architecture, architecture);
        self.selection.architecture = architecture;
        self.selection.category.clear();
        self.selection.family.clear();
        self.selection.size.clear();
        self.carried_suffix = None;

        self.families.reset();
        self.sizes.reset();
        self.generations.invalidate(RequestKind::Families);
        self.generations.invalidate(RequestKind::Sizes);
        Vec::new()
    }

    fn on_category_change(&mut self, category: String) -> Vec<Effect> {
        if category == self.selection.category {
            return Vec::new();
        }
        debug!("Category: '{}' -> '{}'", self.selection.category, category);
        self.selection.category = category;
        self.selection.family.clear();
        self.drop_sizes();

        if self.selection.category.is_empty() {
            self.families.reset();
            self.generations.invalidate(RequestKind::Families);
            return Vec::new();
        }
        self.request_families()
    }

    fn on_family_change(&mut self, family: String) -> Vec<Effect> {
        if family == self.selection.family {
            return Vec::new();
        }
        if !family.is_empty() && !self.families.contains(&family) {
            warn!("Ignoring unknown family '{}'", family);
            return Vec::new();
        }
        debug!("Family: '{}' -> '{}'", self.selection.family, family);
        self.selection.family = family;

        if self.selection.family.is_empty() {
            self.drop_sizes();
            return Vec::new();
        }
        self.request_sizes()
    }

    fn on_size_change(&mut self, size: String) {
        if size == self.selection.size {
            return;
        }
        if !size.is_empty() && !self.sizes.contains(&size) {
            warn!("Ignoring instance type '{}' not offered for this family", size);
            return;
        }
        debug!("Instance type: '{}' -> '{}'", self.selection.size, size);
        self.selection.size = size;
        self.carried_suffix = None;
    }

    fn on_volume_size_change(&mut self, size: u32) {
        if (MIN_VOLUME_SIZE..=MAX_VOLUME_SIZE).contains(&size) {
            self.selection.volume_size = size;
        } else {
            warn!(
                "Ignoring volume size {} outside {}..={}",
                size, MIN_VOLUME_SIZE, MAX_VOLUME_SIZE
            );
        }
    }

    /// Drop the size list, the selection and any carried tier.
    fn drop_sizes(&mut self) {
        self.selection.size.clear();
        self.carried_suffix = None;
        self.sizes.reset();
        self.generations.invalidate(RequestKind::Sizes);
    }

    fn carry_size(&mut self) {
        if let Some(suffix) = size_suffix(&self.selection.size) {
            self.carried_suffix = Some(suffix.to_string());
        }
        self.selection.size.clear();
    }

    fn request_families(&mut self) -> Vec<Effect> {
        self.families.set_loading();
        let query = FamilyQuery {
            region: self.selection.region.clone(),
            architecture: self.selection.architecture,
            category: Some(self.selection.category.clone()),
        };
        debug!("Fetching families for {:?}", query);
        vec![Effect::FetchFamilies {
            tag: self.generations.next(RequestKind::Families),
            query,
        }]
    }

    fn on_families_loaded(
        &mut self,
        tag: RequestTag,
        result: GatewayResult<Vec<InstanceFamily>>,
    ) -> Vec<Effect> {
        if !self.accept(tag) {
            return Vec::new();
        }
        match result {
            Ok(families) => {
                debug!("Received {} families", families.len());
                self.families.resolve(families);
            }
            Err(e) => {
                warn!("Family list fetch failed: {}", e);
                self.families.fail(FAMILY_RETRY_MESSAGE);
                return Vec::new();
            }
        }

        if !self.selection.family.is_empty() {
            return Vec::new();
        }
        let Some(family) = default_family(self.families.entries(), self.selection.architecture)
        else {
            return Vec::new();
        };
        info!("Default family: {}", family.name);
        self.selection.family = family.name.clone();
        self.request_sizes()
    }

    fn request_sizes(&mut self) -> Vec<Effect> {
        self.carry_size();
        self.sizes.set_loading();
        let query = SizeQuery {
            region: self.selection.region.clone(),
            architecture: self.selection.architecture,
            family: self.selection.family.clone(),
        };
        debug!("Fetching sizes for {:?}", query);
        vec![Effect::FetchSizes {
            tag: self.generations.next(RequestKind::Sizes),
            query,
        }]
    }

    fn on_sizes_loaded(&mut self, tag: RequestTag, result: GatewayResult<Vec<InstanceSize>>) {
        if !self.accept(tag) {
            return;
        }
        let mut sizes = match result {
            Ok(sizes) => sizes,
            Err(e) => {
                warn!("Size list fetch failed: {}", e);
                self.sizes.fail(SIZE_RETRY_MESSAGE);
                return;
            }
        };

        if sizes.is_empty() {
            info!("{} has no sizes in {}", self.selection.family, self.selection.region);
            self.sizes
                .mark_empty(unsupported_family_message(&self.selection.family));
            return;
        }

        sort_by_rank(&mut sizes);
        if let Some((chosen, rule)) = best_match(&sizes, self.carried_suffix.as_deref()) {
            debug!("Resolved instance type {} ({:?})", chosen.instance_type, rule);
            self.selection.size = chosen.instance_type.clone();
        }
        self.carried_suffix = None;
        self.sizes.resolve(sizes);
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    fn quick_look(&mut self) -> Vec<Effect> {
        if !self.can_query() {
            debug!("Quick look ignored: action disabled");
            return Vec::new();
        }

        self.previous_price = self.last_price;
        self.instance.start();
        self.volume.start();
        self.detail = DetailView::default();
        self.generations.invalidate(RequestKind::Detail);

        let selection = &self.selection;
        self.pending_instance = Some(ComparisonKey::new(&selection.region, &selection.size));
        info!(
            "Quick look: {} {} op={} volume={} {} GiB",
            selection.region,
            selection.size,
            selection.operation,
            selection.volume_type,
            selection.volume_size
        );

        let instance = InstanceProductQuery {
            region: selection.region.clone(),
            instance_type: selection.size.clone(),
            operation: selection.operation.clone(),
        };
        let volume = VolumeProductQuery {
            region: selection.region.clone(),
            volume_type: selection.volume_type.clone(),
            volume_size: selection.volume_size,
        };
        vec![
            Effect::FetchInstanceProduct {
                tag: self.generations.next(RequestKind::InstanceProduct),
                query: instance,
            },
            Effect::FetchVolumeProduct {
                tag: self.generations.next(RequestKind::VolumeProduct),
                query: volume,
            },
        ]
    }

    fn on_instance_loaded(&mut self, tag: RequestTag, result: GatewayResult<PricedProduct>) {
        if !self.accept(tag) {
            return;
        }
        let pending = self.pending_instance.take();
        self.instance_key = if result.is_ok() { pending } else { None };
        self.instance.finish(result, "instance");
        if let Some(price) = self.instance.priced().and_then(|p| p.price_value()) {
            self.last_price = Some(price);
        }
    }

    fn request_detail(&mut self) -> Vec<Effect> {
        let Some(key) = self.instance_key.clone() else {
            self.status = Some("Run a quick look first.".to_string());
            return Vec::new();
        };
        self.detail.loading = true;
        self.detail.feedback = None;
        vec![Effect::FetchDetail {
            tag: self.generations.next(RequestKind::Detail),
            query: DetailQuery {
                region: key.region,
                instance_type: key.instance_type,
            },
        }]
    }

    fn on_detail_loaded(&mut self, tag: RequestTag, result: GatewayResult<Value>) {
        if !self.accept(tag) {
            return;
        }
        self.detail.loading = false;
        match result {
            Ok(value) => self.detail.value = Some(value),
            Err(e) => {
                warn!("Detail fetch failed: {}", e);
                self.detail.value = None;
                self.detail.feedback = Some(format!("Failed to load instance detail: {e}"));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------------

    fn add_to_comparison(&mut self, now: Instant) -> AddOutcome {
        let outcome = match self.instance_key.clone() {
            Some(key) => self.comparison.add(key, self.instance.priced(), now),
            None => AddOutcome::NoProduct,
        };

        self.status = match outcome {
            AddOutcome::Added(index) => {
                let item = &self.comparison.items()[index];
                info!("Added {} ({}) to comparison", item.key.instance_type, item.key.region);
                Some(format!(
                    "Added {} ({}) to comparison.",
                    item.key.instance_type, item.key.region
                ))
            }
            AddOutcome::Highlighted(_) => Some("Already in the comparison list.".to_string()),
            AddOutcome::Full => Some(format!(
                "Comparison list is full ({} items).",
                self.comparison.capacity()
            )),
            AddOutcome::NoProduct => Some("Nothing priced to compare yet.".to_string()),
        };
        outcome
    }

    fn remove_from_comparison(&mut self, index: usize) {
        match self.comparison.remove(index) {
            Some(item) => {
                info!("Removed {} ({}) from comparison", item.key.instance_type, item.key.region);
                self.status = Some(format!("Removed {} from comparison.", item.key.instance_type));
            }
            None => debug!("Ignoring remove of comparison row {}", index),
        }
    }

    // ------------------------------------------------------------------------
    // Retry
    // ------------------------------------------------------------------------

    fn retry(&mut self) -> Vec<Effect> {
        if self.regions.validity() != Validity::Ready && !self.catalog_loading {
            return self.request_catalog();
        }
        if self.families.validity().is_error() && !self.selection.category.is_empty() {
            return self.request_families();
        }
        if self.sizes.validity().is_error() && !self.selection.family.is_empty() {
            return self.request_sizes();
        }
        debug!("Nothing to retry");
        Vec::new()
    }
}

/// Assemble the startup catalog, failing with the first list that failed.
pub fn catalog_from_parts(
    regions: GatewayResult<Vec<Region>>,
    operations: GatewayResult<Vec<Operation>>,
    categories: GatewayResult<Vec<Category>>,
    volume_types: GatewayResult<Vec<VolumeType>>,
) -> GatewayResult<Catalog> {
    Ok(Catalog {
        regions: regions?,
        operations: operations?,
        categories: categories?,
        volume_types: volume_types?,
    })
}

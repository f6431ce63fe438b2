// src/clouds/field.rs

use log::{debug, info, warn};

use crate::clouds::config::GenerationConfig;
use crate::clouds::generator::{CloudFieldGenerator, PlacedCloud};
use crate::clouds::host::{CloudHost, ShadowSettings};
use crate::error::CloudFieldError;

/// A cloud field attached to one root node of a host scene.
///
/// `N` is the host's node handle and `T` its template handle, so the field
/// can outlive any particular borrow of the host.
#[derive(Clone, Debug)]
pub struct CloudField<N, T> {
    config: GenerationConfig,
    template: T,
    root: N,
    generator: CloudFieldGenerator,
    is_editing: bool,
    warned_live_edit: bool,
}

impl<N, T> CloudField<N, T>
where
    N: Copy + Eq + std::fmt::Debug,
{
    pub fn new(root: N, template: T, config: GenerationConfig) -> Self {
        Self {
            config,
            template,
            root,
            generator: CloudFieldGenerator::new(),
            is_editing: false,
            warned_live_edit: false,
        }
    }

    pub fn with_generator(mut self, generator: CloudFieldGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Takes effect on the next pass.
    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    pub fn root(&self) -> N {
        self.root
    }

    pub fn template(&self) -> &T {
        &self.template
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Live editing regenerates the whole field on every [`CloudField::update`].
    /// Large grids stall the host for seconds per pass, so leave it off outside
    /// of tuning sessions.
    pub fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
        if !editing {
            self.warned_live_edit = false;
        }
    }

    /// First pass, run when the field comes to life.
    pub fn initialize<H>(&self, host: &mut H) -> Result<usize, CloudFieldError>
    where
        H: CloudHost<Node = N, Template = T>,
    {
        let spawned = self.populate(host)?;
        info!("Cloud field {:?} initialized with {} clouds", self.root, spawned);
        Ok(spawned)
    }

    /// Destroys everything under the root, then runs a fresh pass.
    pub fn regenerate<H>(&self, host: &mut H) -> Result<usize, CloudFieldError>
    where
        H: CloudHost<Node = N, Template = T>,
    {
        let removed = host.despawn_children(self.root)?;
        let spawned = self.populate(host)?;
        debug!(
            "Cloud field {:?} regenerated: removed {}, spawned {}",
            self.root, removed, spawned
        );
        Ok(spawned)
    }

    /// Per-frame hook. Regenerates only while live editing is on.
    pub fn update<H>(&mut self, host: &mut H) -> Result<Option<usize>, CloudFieldError>
    where
        H: CloudHost<Node = N, Template = T>,
    {
        if !self.is_editing {
            return Ok(None);
        }
        if !self.warned_live_edit {
            warn!(
                "Live editing cloud field {:?}: regenerating {} cells every frame",
                self.root,
                self.config.cell_count()
            );
            self.warned_live_edit = true;
        }
        self.regenerate(host).map(Some)
    }

    /// One generation pass with the current config, without touching a host.
    pub fn generate(&self) -> Vec<PlacedCloud> {
        self.generator.generate(&self.config)
    }

    /// Instantiates already generated clouds under the root.
    pub fn spawn<H>(&self, host: &mut H, clouds: &[PlacedCloud]) -> Result<usize, CloudFieldError>
    where
        H: CloudHost<Node = N, Template = T>,
    {
        for cloud in clouds {
            host.spawn_cloud(&self.template, self.root, cloud, ShadowSettings::disabled())?;
        }
        Ok(clouds.len())
    }

    fn populate<H>(&self, host: &mut H) -> Result<usize, CloudFieldError>
    where
        H: CloudHost<Node = N, Template = T>,
    {
        self.spawn(host, &self.generate())
    }
}

/// Where the article panel currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    /// Nothing to show; every navigation action is a no-op.
    Empty,
    /// Showing the article at this index.
    Viewing(usize),
}

/// Wrap-around navigation over `len` enriched articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    state: CarouselState,
}

impl Carousel {
    /// Starts at the first article, or `Empty` when `len` is zero.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        let state = if len == 0 {
            CarouselState::Empty
        } else {
            CarouselState::Viewing(0)
        };
        Self { len, state }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn state(&self) -> CarouselState {
        self.state
    }

    /// The index being shown, if any.
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        match self.state {
            CarouselState::Viewing(i) => Some(i),
            CarouselState::Empty => None,
        }
    }

    /// Advances one article, wrapping from the last to the first.
    pub fn next(&mut self) -> CarouselState {
        if let CarouselState::Viewing(i) = self.state {
            self.state = CarouselState::Viewing((i + 1) % self.len);
        }
        self.state
    }

    /// Steps back one article, wrapping from the first to the last.
    pub fn prev(&mut self) -> CarouselState {
        if let CarouselState::Viewing(i) = self.state {
            self.state = CarouselState::Viewing((i + self.len - 1) % self.len);
        }
        self.state
    }

    /// Jumps straight to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> CarouselState {
        if matches!(self.state, CarouselState::Viewing(_)) && index < self.len {
            self.state = CarouselState::Viewing(index);
        }
        self.state
    }

    /// Re-targets the carousel at a new result of `len` articles.
    ///
    /// The current index survives if it is still in range; otherwise the carousel starts
    /// over at the first article.
    pub fn reset(&mut self, len: usize) -> CarouselState {
        self.len = len;
        self.state = match self.state {
            _ if len == 0 => CarouselState::Empty,
            CarouselState::Viewing(i) if i < len => CarouselState::Viewing(i),
            _ => CarouselState::Viewing(0),
        };
        self.state
    }
}

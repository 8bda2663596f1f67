//! Defines a compiled [`Template`]: literal text segments interleaved with
//! slots.

use std::borrow::Cow;
use std::fmt;
use std::mem;

use crate::types::span::Span;
use crate::{Error, Result, Slot};

/// A compiled template.
///
/// A template is an alternating sequence of literal text and slots, always
/// starting and ending with text. There is therefore exactly one more text
/// segment than there are slots. Templates are immutable once built and are
/// shared between sessions using an [`Arc`][std::sync::Arc].
pub struct Template {
    segments: Vec<Cow<'static, str>>,
    slots: Vec<Box<dyn Slot>>,
    width: usize,
}

/// A builder for a compiled template.
///
/// This struct is typically created using [`Template::builder()`].
#[derive(Default)]
pub struct TemplateBuilder {
    segments: Vec<Cow<'static, str>>,
    slots: Vec<Box<dyn Slot>>,
}

impl Template {
    /// Construct a template from its text segments and slots.
    ///
    /// Fails if there is not exactly one more segment than there are slots,
    /// or if any slot has a width of zero.
    pub fn new<I, S>(segments: I, slots: Vec<Box<dyn Slot>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let segments: Vec<_> = segments.into_iter().map(Into::into).collect();
        if segments.len() != slots.len() + 1 {
            return Err(Error::invalid_template(format!(
                "expected {} text segments for {} slots, but got {}",
                slots.len() + 1,
                slots.len(),
                segments.len()
            )));
        }
        let mut width = 0;
        for (i, slot) in slots.iter().enumerate() {
            match slot.width() {
                0 => {
                    let err = Error::invalid_template("slot width must be at least one");
                    return Err(with_excerpt(err, &segments, i));
                }
                w => width += w,
            }
        }
        Ok(Self {
            segments,
            slots,
            width,
        })
    }

    /// Create a new template builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera::{slot::ValueSlot, Template};
    ///
    /// let template = Template::builder()
    ///     .text("<p>")
    ///     .slot(ValueSlot)
    ///     .text("</p>")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(template.slot_count(), 1);
    /// ```
    #[inline]
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// Returns the literal text segments.
    #[inline]
    pub fn segments(&self) -> &[Cow<'static, str>] {
        &self.segments
    }

    /// Returns the number of slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of interpolation values the template consumes.
    ///
    /// This is the sum of the widths of all slots.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn segment(&self, i: usize) -> &str {
        &self.segments[i]
    }

    pub(crate) fn slot(&self, i: usize) -> Option<&dyn Slot> {
        self.slots.get(i).map(|slot| &**slot)
    }

    /// Attach an excerpt of this template pointing at the given slot.
    pub(crate) fn enrich(&self, err: Error, slot: usize) -> Error {
        with_excerpt(err, &self.segments, slot)
    }
}

/// Reconstructs a printable source with `${i}` placeholders for the slots.
fn excerpt(segments: &[Cow<'_, str>], slot: usize) -> (String, Span) {
    let mut source = String::new();
    let mut span = Span { m: 0, n: 0 };
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            let m = source.len();
            source.push_str(&format!("${{{}}}", i - 1));
            if i - 1 == slot {
                span = Span::from(m..source.len());
            }
        }
        source.push_str(segment);
    }
    (source, span)
}

fn with_excerpt(err: Error, segments: &[Cow<'_, str>], slot: usize) -> Error {
    let (source, span) = excerpt(segments, slot);
    err.with_excerpt(source, span)
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("segments", &self.segments)
            .field("slots", &self.slots.len())
            .field("width", &self.width)
            .finish()
    }
}

impl TemplateBuilder {
    /// Creates a new template builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            segments: vec![Cow::Borrowed("")],
            slots: Vec::new(),
        }
    }

    /// Append literal text.
    ///
    /// Adjacent text is merged into a single segment.
    pub fn text(&mut self, text: impl Into<Cow<'static, str>>) -> &mut Self {
        let text = text.into();
        match self.segments.last_mut() {
            Some(last) if !last.is_empty() => last.to_mut().push_str(&text),
            Some(last) => *last = text,
            None => self.segments.push(text),
        }
        self
    }

    /// Append a slot.
    pub fn slot(&mut self, slot: impl Slot + 'static) -> &mut Self {
        self.boxed_slot(Box::new(slot))
    }

    /// Append an already boxed slot.
    pub fn boxed_slot(&mut self, slot: Box<dyn Slot>) -> &mut Self {
        if self.segments.is_empty() {
            self.segments.push(Cow::Borrowed(""));
        }
        self.slots.push(slot);
        self.segments.push(Cow::Borrowed(""));
        self
    }

    /// Builds the template, leaving the builder empty.
    pub fn build(&mut self) -> Result<Template> {
        let mut segments = mem::take(&mut self.segments);
        let slots = mem::take(&mut self.slots);
        if segments.is_empty() {
            segments.push(Cow::Borrowed(""));
        }
        *self = Self::new();
        Template::new(segments, slots)
    }
}

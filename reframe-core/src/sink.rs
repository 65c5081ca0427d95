//! Consumers of framed sentences

use crate::buffer::{Overrun, Sentence};

/// Receiver of the sentences produced by a framer
///
/// Called synchronously from `feed`, once per delimiter, in stream order.
pub trait SentenceSink {
    /// Handle a complete sentence
    fn on_sentence(&mut self, sentence: Sentence);

    /// Handle a sentence dropped for exceeding the size limit
    ///
    /// Framing has already resynchronized when this is called. Ignored
    /// unless overridden.
    fn on_overrun(&mut self, _overrun: &Overrun) {}
}

/// Collects sentences in order
impl SentenceSink for Vec<Sentence> {
    fn on_sentence(&mut self, sentence: Sentence) {
        self.push(sentence);
    }
}

/// Sink calling a closure for every sentence, see [`from_fn`]
#[derive(Debug, Clone)]
pub struct FnSink<F>(F);

/// Wrap a closure as a [`SentenceSink`]
pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(Sentence),
{
    FnSink(f)
}

impl<F> SentenceSink for FnSink<F>
where
    F: FnMut(Sentence),
{
    fn on_sentence(&mut self, sentence: Sentence) {
        (self.0)(sentence)
    }
}

impl<S: SentenceSink + ?Sized> SentenceSink for &mut S {
    fn on_sentence(&mut self, sentence: Sentence) {
        (**self).on_sentence(sentence)
    }

    fn on_overrun(&mut self, overrun: &Overrun) {
        (**self).on_overrun(overrun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SentenceBuffer;

    fn sentence(text: &str) -> Sentence {
        SentenceBuffer::new(64).unwrap().finalize(text).unwrap()
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Sentence> = Vec::new();
        sink.on_sentence(sentence("a\r"));
        sink.on_sentence(sentence("b\r"));
        assert_eq!(sink, vec![sentence("a\r"), sentence("b\r")]);
    }

    #[test]
    fn test_closure_sink() {
        let mut lengths = Vec::new();
        {
            let mut sink = from_fn(|s: Sentence| lengths.push(s.len()));
            sink.on_sentence(sentence("abc\r"));
            sink.on_overrun(&Overrun {
                dropped: 3,
                max_size: 2,
            });
        }
        assert_eq!(lengths, vec![4]);
    }

    #[test]
    fn test_mut_ref_forwards_overrun() {
        #[derive(Default)]
        struct Counting {
            overruns: usize,
        }

        impl SentenceSink for Counting {
            fn on_sentence(&mut self, _sentence: Sentence) {}

            fn on_overrun(&mut self, _overrun: &Overrun) {
                self.overruns += 1;
            }
        }

        fn report<S: SentenceSink>(mut sink: S) {
            sink.on_overrun(&Overrun {
                dropped: 1,
                max_size: 1,
            });
        }

        let mut counting = Counting::default();
        report(&mut counting);
        assert_eq!(counting.overruns, 1);
    }
}

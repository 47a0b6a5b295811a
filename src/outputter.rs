//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::entry::Entry;
use std::fmt::Debug;

/**
A sink for log entries that passed their threshold.

Outputters may format and write anywhere, drop or buffer internally.  They are
called synchronously on the logging thread, so they should not block
indefinitely.  Failures are the outputter's own business; there is no way to
report them back to the logger.
*/
pub trait Outputter: Debug + Send + Sync {
    /**
        Outputs one entry.
    */
    fn output(&self, entry: &Entry);

    /**
    The application is about to exit (see [`crate::Logger::fatal`]).  Ensure all buffers are flushed.

    The default implementation does nothing, which suits unbuffered outputters.
    */
    fn prepare_to_die(&self) {}
}

/*
Boilerplate notes.

# Outputter

Clone on an outputter doesn't make sense; they are shared via Arc.
PartialEq and Eq are possible but it's unclear if we mean data equality or provenance.  Avoid.
Default is not necessarily sensible since who knows where the outputter writes.
Send/Sync are required: the logger hands the same outputter to every thread.
*/

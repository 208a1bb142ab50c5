use instant::Instant;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
}

/// Hierarchical phase timing, plus a place to collect notes and warnings while building something
/// expensive. Everything is logged as it happens and summarized again when the Timer is dropped,
/// so interesting warnings don't scroll away.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<TimerSpan>,
    outermost_name: String,

    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new<I: Into<String>>(raw_name: I) -> Timer {
        let name = raw_name.into();
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.clone(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    // TODO Shouldn't use this much.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end, to avoid having to scroll up and find
    /// interesting debug stuff.
    pub fn note<I: Into<String>>(&mut self, raw_line: I) {
        let line = raw_line.into();
        info!("{}", line);
        self.notes.push(line);
    }

    pub fn warn<I: Into<String>>(&mut self, raw_line: I) {
        let line = raw_line.into();
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn start<I: Into<String>>(&mut self, raw_name: I) {
        let name = raw_name.into();
        debug!("{}...", name);
        self.stack.push(TimerSpan {
            name,
            started_at: Instant::now(),
            nested_results: Vec::new(),
        });
    }

    pub fn stop<I: Into<String>>(&mut self, raw_name: I) {
        let name = raw_name.into();
        let span = match self.stack.pop() {
            Some(span) => span,
            None => {
                warn!("Timer::stop({}) without a matching start", name);
                return;
            }
        };
        if span.name != name {
            warn!("Timer::stop({}) while {} is running", name, span.name);
        }
        let line = format!(
            "{} took {}",
            span.name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        debug!("{}", line);

        let padding = "  ".repeat(self.stack.len());
        let mut lines = vec![format!("{}- {}", padding, line)];
        lines.extend(span.nested_results);
        match self.stack.last_mut() {
            Some(parent) => parent.nested_results.extend(lines),
            None => self.results.extend(lines),
        }
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        // Close anything the caller left open, innermost first.
        while let Some(span) = self.stack.last() {
            let name = span.name.clone();
            self.stop(name);
        }

        if self.outermost_name == "throwaway" {
            return;
        }
        for line in &self.results {
            info!("{}", line);
        }
        if !self.notes.is_empty() {
            info!("{} notes:", self.notes.len());
            for line in &self.notes {
                info!("  {}", line);
            }
        }
        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("  {}", line);
            }
        }
    }
}

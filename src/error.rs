use std::path::PathBuf;
use std::process::ExitStatus;

error_chain! {
    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        /// A path that must name a directory (the DynamoRio root or the samples directory)
        /// names something else, or nothing at all.
        NotADirectory(path: PathBuf) {
            description("not a directory")
            display("`{}` is not a directory", path.display())
        }

        /// The samples directory holds no regular files, so there is nothing to trace.
        EmptySampleSet(path: PathBuf) {
            description("no sample files")
            display("sample directory `{}` contains no regular files", path.display())
        }

        /// The output directory does not have the layout produced by a collection run.
        InvalidWorkDir(path: PathBuf) {
            description("invalid working directory")
            display("`{}` is not a trace working directory (run the collector first?)", path.display())
        }

        /// One of the external tools exited with a non-zero status.
        ToolFailed(tool: &'static str, status: ExitStatus) {
            description("external tool failed")
            display("`{}` exited with status {}", tool, status)
        }

        /// The aggregated coverage info file holds no coverage records at all, usually
        /// because the source filter excluded every file. Recoverable in the sense that
        /// the condition is reported as a plain warning rather than an error chain.
        NoValidRecords {
            description("the coverage info file contains no valid records")
        }
    }
}

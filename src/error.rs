error_chain! {
    foreign_links {
        Io(std::io::Error);
    }

    errors {
        InvalidReference(index: usize) {
            description("operation references a vertex that is not in the graph")
            display("operation references a vertex that is not in the graph: {}", index)
        }

        MismatchedKmerLengths(first: usize, second: usize) {
            description("the two k-mers of a window pair have different lengths")
            display("the two k-mers of a window pair have different lengths: {} and {}", first, second)
        }

        InconsistentKmerLength(expected: usize, actual: usize) {
            description("k-mer length differs from the length established by earlier windows")
            display("k-mer length {} differs from the length established by earlier windows ({})", actual, expected)
        }

        SequenceTooShort(length: usize, kmer_length: usize) {
            description("sequence is shorter than the k-mer length")
            display("sequence of length {} is shorter than the k-mer length {}", length, kmer_length)
        }

        EmptyKmer {
            description("k-mers must contain at least one base")
            display("k-mers must contain at least one base")
        }

        InvariantViolation(message: String) {
            description("internal graph invariant violated")
            display("internal graph invariant violated: {}", message)
        }
    }
}

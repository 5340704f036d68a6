use kernel::KernelError;

/// Maps a backend error into the kernel taxonomy.
pub trait ConvertError: Sized {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

use crate::{GenerateError, render::ident, unit::GenerationUnit};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

pub(crate) fn generate(unit: &GenerationUnit, rt: &Ident) -> Result<TokenStream, GenerateError> {
    let data = ident(unit, &unit.name, &unit.name)?;
    let set = format_ident!("{}Set", data);
    let model = format_ident!("Model{}", data);

    let doc = format!(
        " {}Set is an autogenerated type to handle {} objects.",
        unit.name, unit.name
    );
    let new_doc = format!(" Returns a new {}Set bound to the given environment.", unit.name);

    // a declared Create replaces the runtime insert
    let create = if unit.dispatch_create {
        quote! {
            self.collection
                .call("Create", [#rt::FieldValue::into_value(#rt::RecordData::into_values(data))])
                .cast()
        }
    } else {
        quote!(self.collection.create(#rt::RecordData::into_values(data)))
    };

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #set {
            collection: #rt::RecordCollection,
        }

        impl #set {
            #[doc = #new_doc]
            pub fn new(env: &#rt::Environment) -> Self {
                Self {
                    collection: env.pool(#model),
                }
            }

            /// Creates a new record from the given data and returns it.
            pub fn create(&self, data: #data) -> #set {
                Self {
                    collection: #create,
                }
            }

            /// Updates every record with the given data.
            ///
            /// Only the listed fields are written, or every non-zero field when none are listed.
            pub fn write(&self, data: #data, fields: &[#rt::FieldName]) {
                self.collection.write(#rt::RecordData::into_values(data), fields);
            }

            /// Returns the data of the first record, or the zero value when empty.
            pub fn first(&self) -> #data {
                self.collection.first::<#data>()
            }

            /// Returns the data of every record.
            pub fn all(&self) -> Vec<#data> {
                self.collection.all::<#data>()
            }

            /// Returns one singleton per record.
            pub fn records(&self) -> Vec<Self> {
                self.collection
                    .records()
                    .into_iter()
                    .map(|collection| Self { collection })
                    .collect()
            }

            pub fn search(&self, condition: #rt::Condition) -> Self {
                Self {
                    collection: self.collection.search(condition),
                }
            }

            pub fn filter(
                &self,
                field: impl AsRef<str>,
                operator: #rt::Operator,
                value: impl Into<#rt::Value>,
            ) -> Self {
                Self {
                    collection: self.collection.filter(field, operator, value),
                }
            }

            pub fn load(&self) -> Self {
                Self {
                    collection: self.collection.load(),
                }
            }

            pub fn union(&self, other: &Self) -> Self {
                Self {
                    collection: self.collection.union(&other.collection),
                }
            }
        }

        impl ::std::ops::Deref for #set {
            type Target = #rt::RecordCollection;

            fn deref(&self) -> &Self::Target {
                &self.collection
            }
        }

        impl #rt::RecordSet for #set {
            const MODEL: #rt::ModelName = #model;

            fn from_collection(collection: #rt::RecordCollection) -> Self {
                Self { collection }
            }

            fn collection(&self) -> &#rt::RecordCollection {
                &self.collection
            }

            fn into_collection(self) -> #rt::RecordCollection {
                self.collection
            }
        }

        impl From<#set> for #rt::Value {
            fn from(set: #set) -> Self {
                #rt::Value::Collection(set.collection)
            }
        }

        impl #rt::FieldValue for #set {
            fn into_value(self) -> #rt::Value {
                #rt::Value::Collection(self.collection)
            }

            fn from_value(value: #rt::Value) -> Result<Self, #rt::ValueError> {
                <#rt::RecordCollection as #rt::FieldValue>::from_value(value)
                    .map(|collection| Self { collection })
            }
        }
    })
}
